//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shorturl::codec;
use shorturl::config::{DatabaseConfig, StaticConfig, VisitLogMode};
use shorturl::storage::{LinkStore, NewShortLink, OwnerId, SeaOrmStorage, ShortLink};
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &str = "integration_test_secret_32_bytes";

pub fn test_database_config(dir: &TempDir) -> DatabaseConfig {
    let db_path = dir.path().join("test.db");
    DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        pool_size: 10,
        // 并发测试下 SQLite 写锁排队较久
        operation_timeout_ms: 30_000,
        retry_count: 5,
        retry_base_delay_ms: 10,
        retry_max_delay_ms: 200,
    }
}

pub fn test_config(dir: &TempDir) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.database = test_database_config(dir);
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    config.analytics.visit_log = VisitLogMode::Inline;
    config
}

/// 创建临时 SQLite 数据库的存储实例
pub async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = SeaOrmStorage::new(&test_database_config(&temp_dir))
        .await
        .expect("Failed to create storage");
    (Arc::new(storage), temp_dir)
}

/// Insert a link directly through the store, bypassing request validation.
pub async fn insert_link(
    store: &dyn LinkStore,
    url: &str,
    owner: OwnerId,
    expires_at: Option<DateTime<Utc>>,
) -> ShortLink {
    store
        .create(NewShortLink {
            url: url.to_string(),
            hash: codec::hash_url(url),
            owner_id: owner,
            expires_at,
        })
        .await
        .expect("Failed to insert link")
}

pub fn code_for(url: &str) -> String {
    codec::encode(&codec::hash_url(url)).into_string()
}
