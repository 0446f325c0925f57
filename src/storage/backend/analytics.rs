//! Analytics 相关的数据库查询
//!
//! 访问日志的统计查询，供 AnalyticsService 调用。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};

use super::{SeaOrmStorage, retry};
use crate::errors::Result;
use crate::storage::models::LinkId;
use crate::storage::traits::VisitQuery;

use migration::entities::visit;

/// 来源查询结果行
#[derive(Debug, FromQueryResult)]
struct ReferrerRow {
    referrer: Option<String>,
    count: i64,
}

#[async_trait]
impl VisitQuery for SeaOrmStorage {
    async fn visit_times_since(
        &self,
        link: LinkId,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>> {
        let db = &self.db;

        let times = retry::with_retry_timeout(
            &format!("visit_times_since({})", link),
            self.retry_config,
            || async {
                visit::Entity::find()
                    .select_only()
                    .column(visit::Column::VisitedAt)
                    .filter(visit::Column::ShortUrlId.eq(link))
                    .filter(visit::Column::VisitedAt.gte(since))
                    .order_by_asc(visit::Column::VisitedAt)
                    .into_tuple::<DateTime<Utc>>()
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(times)
    }

    async fn referrer_counts(&self, link: LinkId) -> Result<Vec<(Option<String>, u64)>> {
        let db = &self.db;

        let rows = retry::with_retry_timeout(
            &format!("referrer_counts({})", link),
            self.retry_config,
            || async {
                visit::Entity::find()
                    .select_only()
                    .column(visit::Column::Referrer)
                    .column_as(visit::Column::Id.count(), "count")
                    .filter(visit::Column::ShortUrlId.eq(link))
                    .group_by(visit::Column::Referrer)
                    .order_by_desc(Expr::cust("count"))
                    .order_by_asc(visit::Column::Referrer)
                    .into_model::<ReferrerRow>()
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.referrer, row.count.max(0) as u64))
            .collect())
    }
}
