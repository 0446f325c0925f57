//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ExprTrait, QueryFilter, SqlErr,
    sea_query::Expr,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{
    model_to_shortlink, model_to_visit_event, new_link_to_active_model, new_visit_to_active_model,
};
use super::retry;
use crate::errors::{Result, ShorturlError};
use crate::storage::models::{LinkId, NewShortLink, NewVisit, ShortLink, VisitEvent};

use migration::entities::{short_url, visit};

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl SeaOrmStorage {
    pub(super) async fn insert_link(&self, link: NewShortLink) -> Result<ShortLink> {
        let db = &self.db;
        let model = new_link_to_active_model(&link, Utc::now());

        let result = retry::with_write_retry(
            &format!("create({})", link.hash),
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.insert(db).await }
            },
        )
        .await;

        match result {
            Ok(inserted) => {
                info!(
                    "Short link created: id={} hash={} owner={}",
                    inserted.id, inserted.hash_value, inserted.owner_id
                );
                model_to_shortlink(inserted)
            }
            Err(e) if is_unique_violation(&e) => Err(ShorturlError::duplicate_url(format!(
                "an active short link already exists for {}",
                link.url
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub(super) async fn bump_request_count(&self, id: LinkId) -> Result<()> {
        let db = &self.db;

        let result = retry::with_write_retry(
            &format!("increment_visit({})", id),
            self.retry_config,
            || async {
                short_url::Entity::update_many()
                    .col_expr(
                        short_url::Column::RequestCount,
                        Expr::col(short_url::Column::RequestCount).add(1i64),
                    )
                    .filter(short_url::Column::Id.eq(id))
                    .filter(short_url::Column::DeletedAt.is_null())
                    .exec(db)
                    .await
            },
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(ShorturlError::not_found(format!(
                "short link {} is not active",
                id
            )));
        }
        Ok(())
    }

    pub(super) async fn mark_deleted(&self, id: LinkId, at: DateTime<Utc>) -> Result<()> {
        let db = &self.db;

        // deleted_at 与 active_digest 在同一条语句中更新
        let result = retry::with_write_retry(
            &format!("soft_delete({})", id),
            self.retry_config,
            || async {
                short_url::Entity::update_many()
                    .col_expr(short_url::Column::DeletedAt, Expr::value(at))
                    .col_expr(
                        short_url::Column::ActiveDigest,
                        Expr::value(Option::<String>::None),
                    )
                    .filter(short_url::Column::Id.eq(id))
                    .filter(short_url::Column::DeletedAt.is_null())
                    .exec(db)
                    .await
            },
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(ShorturlError::not_found(format!(
                "short link {} does not exist or is already deleted",
                id
            )));
        }

        info!("Short link soft-deleted: id={}", id);
        Ok(())
    }

    pub(super) async fn insert_visit(&self, visit: NewVisit) -> Result<VisitEvent> {
        let db = &self.db;
        let model = new_visit_to_active_model(&visit);

        let inserted = retry::with_write_retry(
            &format!("append_visit({})", visit.link_id),
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.insert(db).await }
            },
        )
        .await?;

        debug!(
            "Visit recorded: link={} referrer={:?}",
            inserted.short_url_id, inserted.referrer
        );
        Ok(model_to_visit_event(inserted))
    }
}
