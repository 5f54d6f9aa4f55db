//! Diagnostic logging setup.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

/// Installs the global `tracing` subscriber described by `config`.
///
/// Does nothing when no filter is configured. Returns `Ok(false)` when another subscriber was
/// already installed.
pub fn init(config: &EnvConfig) -> io::Result<bool> {
    let Some(directive) = config.log_filter.as_deref() else {
        return Ok(false);
    };
    let filter = EnvFilter::try_new(directive).map_err(io::Error::other)?;

    let installed = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .is_ok()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
            .is_ok(),
    };
    Ok(installed)
}
