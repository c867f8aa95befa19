//! Configuration module for luahost.

use serde::Deserialize;
use std::path::Path;

use crate::{HostError, Result};

/// Script loading configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoaderConfig {
    /// Abort a batch load on the first unreadable file instead of
    /// continuing with the remaining files.
    #[serde(default)]
    pub stop_on_missing_file: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/luahost.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostConfig {
    /// Script loading settings.
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HostConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(HostError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| HostError::Config(format!("config parse error: {e}")))
    }
}
