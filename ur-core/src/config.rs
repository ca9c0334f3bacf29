//! Client configuration management.
//!
//! Handles loading, saving, and accessing the settings the API client needs:
//! base URL, network timeouts, the optional rate-limit retry bound, and
//! logging. Configuration is persisted as TOML on disk. The API key is not
//! part of it and is always handed to the client directly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{UrError, UrResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root that endpoint names are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in milliseconds. Unset means the network layer default.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    /// Connection establishment timeout in milliseconds.
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,

    /// Maximum number of retries after HTTP 429. Unset means retry until admitted.
    #[serde(default)]
    pub max_rate_limit_retries: Option<u32>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

fn default_base_url() -> String {
    constants::DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: None,
            connect_timeout_ms: None,
            max_rate_limit_retries: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ApiConfig {
    /// Read the API key from `UPTIMEROBOT_API_KEY`.
    pub fn api_key_from_env() -> UrResult<String> {
        std::env::var(constants::API_KEY_ENV).map_err(|_| {
            UrError::Config(format!("{} is not set", constants::API_KEY_ENV))
        })
    }

    /// The configured request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// The configured connect timeout, if any.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    /// Sanitize a base URL: strip whitespace, stray quotes, and trailing slashes.
    pub fn sanitize_base_url(base_url: &str) -> String {
        base_url
            .trim()
            .trim_matches('"')
            .trim()
            .trim_end_matches('/')
            .to_string()
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> UrResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> UrResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> UrResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| UrError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the platform-specific data directory.
    ///
    /// - Windows: `%APPDATA%/UptimeRobot`
    /// - macOS: `~/Library/Application Support/UptimeRobot`
    /// - Linux: `~/.local/share/UptimeRobot`
    pub fn data_dir() -> UrResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| UrError::Config("could not determine data directory".into()))?;
        Ok(base.join(constants::APP_NAME))
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> UrResult<PathBuf> {
        Ok(Self::data_dir()?.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> UrResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(Self::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }
}
