//! Structured logging setup.
//!
//! The portal owns the terminal, so log output goes to a daily-rolling file
//! under `${CHIEDZA_HOME}/logs`. The filter comes from `CHIEDZA_LOG`
//! (`EnvFilter` syntax) and defaults to `info`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CHIEDZA_LOG";

const LOG_FILE_PREFIX: &str = "chiedza.log";
const DEFAULT_FILTER: &str = "info";

/// Builds the filter from a raw directive string, falling back to `info`
/// when it is missing or invalid.
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to `logs_dir`.
///
/// The returned guard must be held for the life of the process; dropping it
/// flushes buffered lines.
///
/// # Errors
/// Returns an error if the directory cannot be created or a global
/// subscriber is already installed.
pub fn init(logs_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::registry()
        .with(build_filter(directives.as_deref()))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
