//! Structured logging setup using the `tracing` ecosystem.
//!
//! The API client itself only emits `tracing` events through its observer;
//! embedders decide where they go by installing a subscriber here.

use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;
use crate::constants;
use crate::error::{UrError, UrResult};

/// Install the process-wide subscriber that receives the client's `tracing` events.
///
/// Events go to stderr and to `uptimerobot.log.<date>` under `log_dir`. The file
/// is plain text, or one JSON object per line when `json_output` is set.
/// `level` is an `EnvFilter` directive such as `"debug"` or
/// `"ur_api=debug,warn"`; an invalid directive falls back to `info`. Fails if
/// `log_dir` cannot be created or a subscriber is already installed.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> UrResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, constants::LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let result = if json_output {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    };
    result.map_err(|e| UrError::Config(format!("failed to install subscriber: {e}")))?;

    tracing::info!("logging initialized at level={level}, dir={}", log_dir.display());

    Ok(LogGuard { _guard: guard })
}

/// Initialize logging from an [`AppConfig`], resolving the default log directory.
pub fn init_from_config(config: &AppConfig) -> UrResult<LogGuard> {
    let log_dir = config.effective_log_dir()?;
    init_logging(&config.logging.level, &log_dir, config.logging.json_output)
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Initialize a minimal console-only logger for testing or simple embedding.
pub fn init_console_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_test_writer().compact())
        .try_init();
}
