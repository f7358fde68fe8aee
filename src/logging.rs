//! Optional file logging for the command line tools.

use crate::error::{BpError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Send `tracing` output to `log_path`, truncating it.
///
/// The level comes from `RUST_LOG` and defaults to `debug`. Without a call to
/// this function nothing is logged, so stdout only carries the report.
pub fn init_file_logging(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| BpError::Logging(e.to_string()))
}
