//! Opt-in logging initialization for embedding applications
//!
//! Library code logs through `tracing` macros; hosts that want file logs
//! call [`init`] once at startup. Logs go to a file under the platform
//! data dir, never to stdout, so a UI host stays clean.

use std::fs;
use std::path::PathBuf;

use eyre::{Context, Result};
use tracing::info;

/// Initialize file logging
pub fn init(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nexus-tasks")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("nexus-tasks.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}
