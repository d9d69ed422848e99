//! Logging setup for the dashboard
//!
//! Library code only emits `tracing` events; binaries pick a mode here once
//! at startup.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber installed
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose output with thread ids and source locations
    Debug,
}

impl LoggingMode {
    /// Parse a `VMIX_LOG_MODE` value. Unknown values fall back to `default`.
    pub fn from_env_value(value: Option<&str>, default: LoggingMode) -> LoggingMode {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("silent") => LoggingMode::Silent,
            Some("development") | Some("dev") => LoggingMode::Development,
            Some("debug") => LoggingMode::Debug,
            _ => default,
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Initialize logging with the specified mode
///
/// # Environment Variables
///
/// - `VMIX_LOG_LEVEL`: filter directive, e.g. `debug` or `vmix_client=trace`
/// - `RUST_LOG`: used when `VMIX_LOG_LEVEL` is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .compact(),
                )
                .with(create_env_filter("info"));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(create_env_filter("debug"));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Initialize logging from `VMIX_LOG_MODE` (`silent`, `development`, `debug`).
///
/// The dashboard is a server, so an unset or unknown mode means Development.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let value = std::env::var("VMIX_LOG_MODE").ok();
    init_logging(LoggingMode::from_env_value(
        value.as_deref(),
        LoggingMode::Development,
    ))
}

fn create_env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("VMIX_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}
