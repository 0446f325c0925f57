//! Link management service
//!
//! Owner-scoped creation, deletion and lookup of short links.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::codec::{self, ShortCode};
use crate::errors::{Result, ShorturlError};
use crate::storage::{LinkStore, NewShortLink, OwnerId, ShortLink};
use crate::utils::{parse_expire_time, validate_url};

// ============ Request/Response DTOs ============

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Origin URL
    pub url: String,
    /// Expiration time (RFC3339 or relative like "1d", "2h")
    pub expires_at: Option<String>,
}

/// Result of link creation
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: ShortLink,
    pub code: ShortCode,
}

// ============ LinkService Implementation ============

pub struct LinkService {
    store: Arc<dyn LinkStore>,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Parse an optional expiration and reject one that already lies in the past.
    fn parse_expires_at(
        &self,
        expires_at: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = expires_at.filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        let parsed = parse_expire_time(raw, now).map_err(ShorturlError::invalid_expiration)?;
        if parsed < now {
            return Err(ShorturlError::invalid_expiration(format!(
                "expiration {} is in the past",
                parsed.to_rfc3339()
            )));
        }
        Ok(Some(parsed))
    }

    /// Create a short link for `req.url` owned by `owner`.
    pub async fn create_link(&self, owner: OwnerId, req: CreateLinkRequest) -> Result<CreatedLink> {
        let url = validate_url(&req.url)?;
        let expires_at = self.parse_expires_at(req.expires_at.as_deref(), Utc::now())?;

        let hash = codec::hash_url(url);
        let code = codec::encode(&hash);

        let link = self
            .store
            .create(NewShortLink {
                url: url.to_string(),
                hash,
                owner_id: owner,
                expires_at,
            })
            .await?;

        info!(
            "LinkService: owner {} created '{}' -> '{}'",
            owner, code, link.url
        );
        Ok(CreatedLink { link, code })
    }

    /// Active link behind `code` if `owner` owns it.
    ///
    /// Links owned by someone else are reported as `NotFound` so callers
    /// cannot probe for codes they do not own.
    pub async fn resolve_owned(&self, owner: OwnerId, code: &str) -> Result<ShortLink> {
        let hash = codec::decode(code)?;
        self.store
            .find_active_by_hash_and_owner(&hash, owner)
            .await?
            .ok_or_else(|| ShorturlError::not_found(format!("short link '{}' not found", code)))
    }

    /// Soft-delete the link behind `code`.
    pub async fn delete_link(&self, owner: OwnerId, code: &str) -> Result<()> {
        let link = self.resolve_owned(owner, code).await?;
        self.store.soft_delete(link.id, Utc::now()).await?;
        debug!("LinkService: owner {} deleted '{}'", owner, code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct NoStore;

    #[async_trait::async_trait]
    impl LinkStore for NoStore {
        async fn create(&self, _link: NewShortLink) -> Result<ShortLink> {
            Err(ShorturlError::storage("unreachable"))
        }
        async fn find_active_by_hash(&self, _hash: &codec::UrlHash) -> Result<Option<ShortLink>> {
            Ok(None)
        }
        async fn find_active_by_hash_and_owner(
            &self,
            _hash: &codec::UrlHash,
            _owner: OwnerId,
        ) -> Result<Option<ShortLink>> {
            Ok(None)
        }
        async fn increment_visit(&self, _id: i64) -> Result<()> {
            Ok(())
        }
        async fn soft_delete(&self, _id: i64, _at: DateTime<Utc>) -> Result<()> {
            Ok(())
        }
    }

    fn service() -> LinkService {
        LinkService::new(Arc::new(NoStore))
    }

    #[test]
    fn test_parse_expires_at() {
        let svc = service();
        let now = Utc::now();

        assert_eq!(svc.parse_expires_at(None, now).unwrap(), None);
        assert_eq!(svc.parse_expires_at(Some("  "), now).unwrap(), None);
        assert_eq!(
            svc.parse_expires_at(Some("1d"), now).unwrap(),
            Some(now + Duration::days(1))
        );
        assert!(matches!(
            svc.parse_expires_at(Some("2000-01-01T00:00:00Z"), now),
            Err(ShorturlError::InvalidExpiration(_))
        ));
        assert!(matches!(
            svc.parse_expires_at(Some("soon"), now),
            Err(ShorturlError::InvalidExpiration(_))
        ));
    }

    #[test]
    fn test_expiration_equal_to_now_is_accepted() {
        use chrono::TimeZone;

        let svc = service();
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(
            svc.parse_expires_at(Some("2030-01-01T00:00:00Z"), now)
                .unwrap(),
            Some(now)
        );
        assert!(matches!(
            svc.parse_expires_at(Some("2029-12-31T23:59:59Z"), now),
            Err(ShorturlError::InvalidExpiration(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_url_before_store() {
        let err = service()
            .create_link(
                1,
                CreateLinkRequest {
                    url: "javascript:alert(1)".to_string(),
                    expires_at: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ShorturlError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_invalid_code_is_reported_before_lookup() {
        let err = service().delete_link(1, "not-a-code").await.unwrap_err();
        assert!(matches!(err, ShorturlError::InvalidCode(_)));
    }
}
