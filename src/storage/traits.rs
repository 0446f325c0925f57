//! Storage seams used by the services
//!
//! `SeaOrmStorage` implements all three; services hold them as
//! `Arc<dyn ...>` so they can be backed by different stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::{LinkId, NewShortLink, NewVisit, OwnerId, ShortLink, VisitEvent};
use crate::codec::UrlHash;
use crate::errors::Result;

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a new active link. Fails with `DuplicateUrl` when an active
    /// link for the same URL already exists.
    async fn create(&self, link: NewShortLink) -> Result<ShortLink>;

    /// Active (not soft-deleted) link with this hash, expired or not.
    async fn find_active_by_hash(&self, hash: &UrlHash) -> Result<Option<ShortLink>>;

    async fn find_active_by_hash_and_owner(
        &self,
        hash: &UrlHash,
        owner: OwnerId,
    ) -> Result<Option<ShortLink>>;

    /// Atomically add one to the visit counter of an active link.
    async fn increment_visit(&self, id: LinkId) -> Result<()>;

    /// Mark an active link deleted at `at`. Fails with `NotFound` if the
    /// link is absent or already deleted.
    async fn soft_delete(&self, id: LinkId, at: DateTime<Utc>) -> Result<()>;
}

#[async_trait]
pub trait VisitLog: Send + Sync {
    async fn append(&self, visit: NewVisit) -> Result<VisitEvent>;
}

#[async_trait]
pub trait VisitQuery: Send + Sync {
    /// Visit timestamps at or after `since`, oldest first.
    async fn visit_times_since(
        &self,
        link: LinkId,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>>;

    /// Visit counts grouped by referrer, most frequent first.
    async fn referrer_counts(&self, link: LinkId) -> Result<Vec<(Option<String>, u64)>>;
}
