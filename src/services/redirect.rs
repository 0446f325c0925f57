//! Redirect resolution
//!
//! code → hash → active link → counter bump → visit event → origin URL.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::codec;
use crate::config::VisitLogMode;
use crate::errors::{Result, ShorturlError};
use crate::storage::{LinkState, LinkStore, NewVisit, VisitLog};

/// Request-side facts recorded with a visit.
#[derive(Debug, Clone)]
pub struct VisitContext {
    pub referrer: Option<String>,
    pub at: DateTime<Utc>,
}

impl VisitContext {
    pub fn new(referrer: Option<&str>, at: DateTime<Utc>) -> Self {
        let referrer = referrer
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        Self { referrer, at }
    }
}

pub struct RedirectService {
    links: Arc<dyn LinkStore>,
    visits: Arc<dyn VisitLog>,
    mode: VisitLogMode,
}

impl RedirectService {
    pub fn new(links: Arc<dyn LinkStore>, visits: Arc<dyn VisitLog>, mode: VisitLogMode) -> Self {
        Self {
            links,
            visits,
            mode,
        }
    }

    /// Resolve `code` to its origin URL and count the visit.
    ///
    /// The counter increment must succeed for the redirect to succeed. The
    /// visit event is best effort: a failed append is logged and dropped.
    #[instrument(skip(self, ctx), fields(code = %code))]
    pub async fn redirect(&self, code: &str, ctx: VisitContext) -> Result<String> {
        let hash = codec::decode(code)?;

        let link = self
            .links
            .find_active_by_hash(&hash)
            .await?
            .ok_or_else(|| ShorturlError::not_found(format!("short link '{}' not found", code)))?;

        match link.state_at(ctx.at) {
            LinkState::Active => {}
            LinkState::Expired => {
                debug!("Short link '{}' expired at {:?}", code, link.expires_at);
                return Err(ShorturlError::expired(format!(
                    "short link '{}' has expired",
                    code
                )));
            }
            LinkState::Deleted => {
                return Err(ShorturlError::not_found(format!(
                    "short link '{}' not found",
                    code
                )));
            }
        }

        self.links.increment_visit(link.id).await?;

        let visit = NewVisit {
            link_id: link.id,
            referrer: ctx.referrer,
            visited_at: ctx.at,
        };
        match self.mode {
            VisitLogMode::Inline => record_visit(self.visits.as_ref(), visit).await,
            VisitLogMode::Detached => {
                let visits = Arc::clone(&self.visits);
                tokio::spawn(async move {
                    record_visit(visits.as_ref(), visit).await;
                });
            }
        }

        Ok(link.url)
    }
}

async fn record_visit(visits: &dyn VisitLog, visit: NewVisit) {
    let link_id = visit.link_id;
    if let Err(e) = visits.append(visit).await {
        warn!("Dropping visit event for link {}: {}", link_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_referrer_is_absent() {
        let now = Utc::now();
        assert_eq!(VisitContext::new(None, now).referrer, None);
        assert_eq!(VisitContext::new(Some(""), now).referrer, None);
        assert_eq!(VisitContext::new(Some("   "), now).referrer, None);
        assert_eq!(
            VisitContext::new(Some(" https://a.com/ "), now).referrer.as_deref(),
            Some("https://a.com/")
        );
    }
}
