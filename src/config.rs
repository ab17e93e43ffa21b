use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECONDS};
use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feeds: FeedsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Directory or http(s) base holding `components.json` and `patterns.json`.
    pub base: String,
    pub timeout_seconds: u64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            base: ".".to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// When unset, logs only go to the console.
    pub directory: Option<String>,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Reads the TOML file at `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        if config.feeds.timeout_seconds == 0 {
            return Err(CatalogError::Config(
                "feeds.timeout_seconds must be greater than zero".into(),
            ));
        }
        Ok(config)
    }
}
