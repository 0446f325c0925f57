//! Analytics service layer
//!
//! Read-only projections over a resolved link and its visit events. Daily
//! buckets are computed here from raw timestamps so every backend groups by
//! the same UTC calendar date.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::errors::Result;
use crate::storage::{ShortLink, VisitQuery};

// ============ 公共类型定义 ============

/// Visits on one UTC calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Visits sharing one referrer; `None` groups visits without a Referer header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferrerCount {
    pub referrer: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub daily_visits: Vec<DailyCount>,
    pub total_visits: u64,
    pub referrers: Vec<ReferrerCount>,
}

/// Group timestamps by UTC date, ascending, omitting empty days.
pub fn bucket_by_day(times: &[DateTime<Utc>]) -> Vec<DailyCount> {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for t in times {
        *buckets.entry(t.date_naive()).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

// ============ AnalyticsService ============

pub struct AnalyticsService {
    visits: Arc<dyn VisitQuery>,
    window: Duration,
}

impl AnalyticsService {
    pub fn new(visits: Arc<dyn VisitQuery>, config: &AnalyticsConfig) -> Self {
        Self {
            visits,
            window: Duration::days(config.daily_window_days),
        }
    }

    /// Per-day visit counts for the trailing window ending at `now`.
    pub async fn daily_visits(&self, link: &ShortLink, now: DateTime<Utc>) -> Result<Vec<DailyCount>> {
        let since = now - self.window;
        let times = self.visits.visit_times_since(link.id, since).await?;
        debug!(
            "daily_visits: link={} events={} since={}",
            link.id,
            times.len(),
            since
        );
        Ok(bucket_by_day(&times))
    }

    /// The link's counter, which is authoritative over the event log.
    pub fn total_visits(&self, link: &ShortLink) -> u64 {
        link.visit_count
    }

    /// All-time visits grouped by referrer, most frequent first.
    pub async fn referrer_breakdown(&self, link: &ShortLink) -> Result<Vec<ReferrerCount>> {
        let rows = self.visits.referrer_counts(link.id).await?;
        Ok(rows
            .into_iter()
            .map(|(referrer, count)| ReferrerCount { referrer, count })
            .collect())
    }

    pub async fn link_stats(&self, link: &ShortLink, now: DateTime<Utc>) -> Result<LinkStats> {
        let (daily_visits, referrers) =
            futures_util::try_join!(self.daily_visits(link, now), self.referrer_breakdown(link))?;

        Ok(LinkStats {
            daily_visits,
            total_visits: self.total_visits(link),
            referrers,
        })
    }
}
