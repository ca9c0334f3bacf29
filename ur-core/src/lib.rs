//! UptimeRobot Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the API client crate:
//! - Client configuration (base URL, timeouts, rate-limit policy)
//! - The error type covering every failure a call can surface
//! - Structured logging with tracing
//! - Common constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::{ApiConfig, AppConfig};
pub use error::{UrError, UrResult};
pub use logging::init_logging;
