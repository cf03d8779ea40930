//! Logging setup for the importer binary

use crate::utils::error::{ImportError, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor a level is given
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter: an explicit level wins over `RUST_LOG`
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| ImportError::Config(format!("Invalid log level {:?}: {}", level, e))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))),
    }
}

/// Install the global subscriber
///
/// Logs go to stderr so that `--json` output on stdout stays machine readable.
pub fn init_logging(level: Option<&str>, json: bool) -> Result<()> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| ImportError::Internal(format!("Failed to install logger: {}", e)))
}
