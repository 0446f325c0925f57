use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShorturlError};

/// Shortest HS256 secret accepted by `validate`.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 优先级：ENV > config.toml > 默认值
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// ENV 前缀：SU，分隔符：__
    /// 示例：SU__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File, FileFormat};

        let explicit = path.is_some();
        let path = path.unwrap_or("config.toml");

        let settings = Config::builder()
            // 显式指定的配置文件必须存在
            .add_source(File::new(path, FileFormat::Toml).required(explicit))
            .add_source(
                Environment::with_prefix("SU")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;

        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ShorturlError::config(format!(
                "auth.jwt_secret must be at least {} characters",
                MIN_JWT_SECRET_LEN
            )));
        }
        if self.database.operation_timeout_ms == 0 {
            return Err(ShorturlError::config(
                "database.operation_timeout_ms must be greater than 0",
            ));
        }
        if self.analytics.daily_window_days <= 0 {
            return Err(ShorturlError::config(
                "analytics.daily_window_days must be greater than 0",
            ));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// Per-attempt deadline for a single store operation
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" 或 "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// Bearer token 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: u64,
}

/// How a redirect records its visit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisitLogMode {
    /// Spawned on the runtime; the redirect does not wait for it.
    #[default]
    Detached,
    /// Awaited before the redirect returns.
    Inline,
}

/// 分析统计配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub visit_log: VisitLogMode,
    #[serde(default = "default_daily_window_days")]
    pub daily_window_days: i64,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "shorturl.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_operation_timeout_ms() -> u64 {
    5000
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_jwt_secret() -> String {
    // 未配置时每次启动随机生成，已签发的 token 在重启后失效
    crate::utils::generate_secure_token(MIN_JWT_SECRET_LEN)
}

fn default_access_token_minutes() -> u64 {
    15
}

fn default_daily_window_days() -> i64 {
    7
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            operation_timeout_ms: default_operation_timeout_ms(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_minutes: default_access_token_minutes(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            visit_log: VisitLogMode::default(),
            daily_window_days: default_daily_window_days(),
        }
    }
}
