//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `PANOCAPTURE_LOG` environment variable (a level or filter directives,
//!    e.g. `debug` or `pano_core=trace`)
//! 3. default to `info`
//!
//! Logs go to STDERR so that stdout carries only progress and reports.

use crate::cli::LogLevel;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV_VAR: &str = "PANOCAPTURE_LOG";

/// Initialise the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level_directive(level)),
        None => std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|s| EnvFilter::try_new(s.trim()).ok())
            .unwrap_or_else(|| EnvFilter::new("info")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("failed to initialise logging: {e}"))
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
