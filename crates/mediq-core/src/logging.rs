//! Tracing setup.
//!
//! The TUI owns the terminal, so log output goes to a file under
//! ${MEDIQ_HOME}/logs instead of stderr. Filtering follows RUST_LOG, with a
//! quiet default.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::paths;

const DEFAULT_FILTER: &str = "mediq=info";

/// Initializes the global tracing subscriber, appending to
/// ${MEDIQ_HOME}/logs/mediq.log.
pub fn init() -> Result<()> {
    let logs_dir = paths::logs_dir();
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create directory {}", logs_dir.display()))?;

    let log_path = logs_dir.join("mediq.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
