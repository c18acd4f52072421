// src/logging.rs

//! Tracing setup for the `livereset` binary.
//!
//! `--log-level` wins. Without it, `LIVERESET_LOG` is read as a full
//! `EnvFilter` directive list, so `LIVERESET_LOG=info,livereset::watch=trace`
//! narrows verbose output to the watcher. Otherwise everything logs at `info`.
//!
//! Output goes to stderr: a relaunched application inherits our stdout.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "LIVERESET_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => filter_for_level(level),
        None => std::env::var(LOG_ENV)
            .map(|s| filter_from_directives(&s))
            .unwrap_or_else(|_| default_filter()),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Filter for an explicit `--log-level`; applies to every target.
pub fn filter_for_level(level: LogLevel) -> EnvFilter {
    EnvFilter::new(directive(level))
}

/// Parse a `LIVERESET_LOG`-style directive list. Malformed input falls back
/// to the default rather than silencing output.
pub fn filter_from_directives(directives: &str) -> EnvFilter {
    let directives = directives.trim();
    if directives.is_empty() {
        return default_filter();
    }
    EnvFilter::try_new(directives).unwrap_or_else(|_| default_filter())
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVE)
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
