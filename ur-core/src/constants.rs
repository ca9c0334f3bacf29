//! Application-wide constants.

/// Application name, used for the data directory.
pub const APP_NAME: &str = "UptimeRobot";

/// Default API root. Endpoints are appended as path segments.
pub const DEFAULT_BASE_URL: &str = "https://api.uptimerobot.com/v2";

/// Environment variable consulted by [`crate::config::ApiConfig::api_key_from_env`].
pub const API_KEY_ENV: &str = "UPTIMEROBOT_API_KEY";

/// Output format flag injected into every request payload.
pub const OUTPUT_FORMAT: &str = "json";

/// Envelope `stat` value marking a successful call.
pub const STAT_OK: &str = "ok";

/// Wait applied when a 429 carries no usable `Retry-After` value.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Log file name prefix for the rolling file appender.
pub const LOG_FILE_NAME: &str = "uptimerobot.log";
