//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod analytics;
mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::codec::UrlHash;
use crate::config::DatabaseConfig;
use crate::errors::{Result, ShorturlError};
use crate::storage::models::{LinkId, NewShortLink, NewVisit, OwnerId, ShortLink, VisitEvent};
use crate::storage::traits::{LinkStore, VisitLog};

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ShorturlError::config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    /// Connect, run pending migrations and return a ready store.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        if config.database_url.is_empty() {
            return Err(ShorturlError::config("database.database_url 未设置"));
        }

        let backend_name = infer_backend_from_url(&config.database_url)?;
        let db = if backend_name == "sqlite" {
            connect_sqlite(config).await?
        } else {
            connect_generic(config, &backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name,
            retry_config: retry::RetryConfig::from(config),
        };

        run_migrations(&storage.db).await?;

        info!(
            "{} storage initialized",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Round-trip to the database, used by the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await.map_err(Into::into)
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn create(&self, link: NewShortLink) -> Result<ShortLink> {
        self.insert_link(link).await
    }

    async fn find_active_by_hash(&self, hash: &UrlHash) -> Result<Option<ShortLink>> {
        self.find_link(hash, None).await
    }

    async fn find_active_by_hash_and_owner(
        &self,
        hash: &UrlHash,
        owner: OwnerId,
    ) -> Result<Option<ShortLink>> {
        self.find_link(hash, Some(owner)).await
    }

    async fn increment_visit(&self, id: LinkId) -> Result<()> {
        self.bump_request_count(id).await
    }

    async fn soft_delete(&self, id: LinkId, at: DateTime<Utc>) -> Result<()> {
        self.mark_deleted(id, at).await
    }
}

#[async_trait]
impl VisitLog for SeaOrmStorage {
    async fn append(&self, visit: NewVisit) -> Result<VisitEvent> {
        self.insert_visit(visit).await
    }
}
