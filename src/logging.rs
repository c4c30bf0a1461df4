//! Logging setup for CineInfo
//!
//! Configures a `tracing` subscriber for the service and the HTTP middleware.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "CINEINFO_LOG";

const DEFAULT_FILTER: &str = "cineinfo=info";

/// Log levels supported by CineInfo.
///
/// These map to the tracing level hierarchy: ERROR, WARN, INFO, DEBUG, TRACE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    /// Request start/finish and upstream replies
    Info,
    /// Outbound request details
    Debug,
    /// Sanitized JSON and finish reasons
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }

    /// Default filter directive for this level, covering the service and the
    /// tower-http request spans.
    pub fn default_directive(self) -> String {
        let level = self.to_tracing_level();
        format!("cineinfo={},tower_http={}", level, level)
    }
}

/// Initialize logging with a specific log level.
///
/// Call once at the start of the process.
///
/// ```no_run
/// use cineinfo::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Info);
/// tracing::info!("CineInfo starting");
/// ```
///
/// Setting `CINEINFO_LOG` takes precedence over the level passed here:
///
/// ```bash
/// CINEINFO_LOG=debug cargo run
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level.default_directive()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("CineInfo logging initialized at level: {:?}", level);
}

/// Initialize logging with a custom filter string.
///
/// Allows per-module control, e.g. tracing the Gemini backend only. An invalid
/// filter falls back to `cineinfo=info` and logs a warning.
///
/// ```no_run
/// use cineinfo::logging::init_logging_with_filter;
///
/// init_logging_with_filter("cineinfo=info,cineinfo::backend=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let (env_filter, valid) = parse_filter(filter);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    if !valid {
        tracing::warn!("Invalid filter string: {}, using default (info)", filter);
    }
    tracing::info!("CineInfo logging initialized with custom filter: {}", filter);
}

fn parse_filter(filter: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_FILTER), false),
    }
}
