//! Logging setup for applications using the xenon clients
//!
//! The request objects emit `tracing` events (dispatch and status at debug,
//! known-divergent endpoints at warn). Nothing is printed until a subscriber
//! is installed, either by the application itself or through this module.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// Install nothing
    Silent,
    /// Compact stderr output at info
    Development,
    /// Pretty output with source locations at debug
    Debug,
}

impl LoggingMode {
    fn from_env_value(value: &str) -> Self {
        match value {
            "development" => LoggingMode::Development,
            "debug" => LoggingMode::Debug,
            _ => LoggingMode::Silent,
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
/// - `XENON_LOG_LEVEL`: filter directive, e.g. `xenon_api=debug`
/// - `RUST_LOG`: used when `XENON_LOG_LEVEL` is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(env_filter("info"));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let subscriber = Registry::default()
                .with(fmt::layer().pretty().with_file(true).with_line_number(true))
                .with(env_filter("debug"));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Initialize logging from `XENON_LOG_MODE` (silent, development, debug)
///
/// Defaults to silent when unset or unrecognised.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = std::env::var("XENON_LOG_MODE")
        .map(|value| LoggingMode::from_env_value(&value))
        .unwrap_or(LoggingMode::Silent);
    init_logging(mode)
}

fn env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("XENON_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}

/// Whether a global subscriber has already been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}
