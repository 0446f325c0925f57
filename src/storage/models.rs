use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::codec::UrlHash;

pub type LinkId = i64;
pub type OwnerId = i64;

/// Lifecycle state of a link at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Active,
    Expired,
    Deleted,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortLink {
    pub id: LinkId,
    pub url: String,
    pub hash: UrlHash,
    pub owner_id: OwnerId,
    pub visit_count: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// A link is still usable at its expiration instant and expires after it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp < now)
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> LinkState {
        if !self.is_active() {
            LinkState::Deleted
        } else if self.is_expired_at(now) {
            LinkState::Expired
        } else {
            LinkState::Active
        }
    }
}

/// Input for inserting a link; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub url: String,
    pub hash: UrlHash,
    pub owner_id: OwnerId,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub link_id: LinkId,
    pub referrer: Option<String>,
    pub visited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitEvent {
    pub id: i64,
    pub link_id: LinkId,
    pub referrer: Option<String>,
    pub visited_at: DateTime<Utc>,
}
