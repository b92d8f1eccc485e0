// src/logging.rs

//! Logging setup for `chorey-schedule` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` (one level for everything),
//! 2. `CHOREY_LOG`, in `EnvFilter` directive syntax, e.g.
//!    `info,chorey_schedule::schedule=trace`,
//! 3. `info`.
//!
//! Logs go to STDERR; stdout carries only the rendered chart.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV_VAR: &str = "CHOREY_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let (filter, rejected) = build_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    if let Some(err) = rejected {
        tracing::warn!("ignoring invalid {LOG_ENV_VAR} value: {err}");
    }
    Ok(())
}

/// Filter for the given CLI level and `CHOREY_LOG` value.
///
/// An unparsable env value falls back to `info`; the parse error is returned
/// alongside so it can be logged once the subscriber is up.
pub fn build_filter(
    cli_level: Option<LogLevel>,
    env_value: Option<&str>,
) -> (EnvFilter, Option<String>) {
    if let Some(level) = cli_level {
        return (EnvFilter::new(level_directive(level)), None);
    }

    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new(DEFAULT_DIRECTIVE), Some(e.to_string())),
        },
        None => (EnvFilter::new(DEFAULT_DIRECTIVE), None),
    }
}

fn level_directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
