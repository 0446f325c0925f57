//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only link lookups.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::converters::model_to_shortlink;
use super::{SeaOrmStorage, retry};
use crate::codec::UrlHash;
use crate::errors::Result;
use crate::storage::models::{OwnerId, ShortLink};

use migration::entities::short_url;

impl SeaOrmStorage {
    /// Active link by hash, optionally restricted to one owner.
    pub(super) async fn find_link(
        &self,
        hash: &UrlHash,
        owner: Option<OwnerId>,
    ) -> Result<Option<ShortLink>> {
        let db = &self.db;
        let hash_value = hash.as_str();

        let model = retry::with_retry_timeout(
            &format!("find_active_by_hash({})", hash),
            self.retry_config,
            || async {
                let mut query = short_url::Entity::find()
                    .filter(short_url::Column::HashValue.eq(hash_value))
                    .filter(short_url::Column::DeletedAt.is_null());
                if let Some(owner) = owner {
                    query = query.filter(short_url::Column::OwnerId.eq(owner));
                }
                // 两个不同 URL 的 40 位前缀碰撞时，取最早创建的那条
                query.order_by_asc(short_url::Column::Id).one(db).await
            },
        )
        .await?;

        model.map(model_to_shortlink).transpose()
    }
}
