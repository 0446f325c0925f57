use std::sync::{Arc, OnceLock};

use super::StaticConfig;
use crate::errors::{Result, ShorturlError};

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Before `init_config` runs this pins the
/// defaults, so every caller sees the same instance.
pub fn get_config() -> Arc<StaticConfig> {
    Arc::clone(CONFIG.get_or_init(|| Arc::new(StaticConfig::default())))
}

/// Initialize the global configuration from `path` (default `config.toml`)
/// and `SU__*` environment variables.
///
/// Calling it twice keeps the first configuration.
pub fn init_config(path: Option<&str>) -> Result<()> {
    if CONFIG.get().is_some() {
        return Ok(());
    }
    let loaded = StaticConfig::load(path)?;
    let _ = CONFIG.set(Arc::new(loaded));
    Ok(())
}

impl From<config::ConfigError> for ShorturlError {
    fn from(err: config::ConfigError) -> Self {
        ShorturlError::Config(err.to_string())
    }
}
