//! Environment variable overrides
//!
//! Variables:
//! - `LITELLM_PROXY_URL`: proxy base URL
//! - `LITELLM_API_KEY`: admin key (falls back to `LITELLM_MASTER_KEY`)
//! - `USER_IMPORT_CONCURRENCY`: rows in flight
//! - `USER_IMPORT_TIMEOUT_SECS`: per-row timeout
//! - `USER_IMPORT_DELIMITER`: single-character field delimiter

use super::Config;
use crate::utils::error::{ImportError, Result};
use std::env;
use tracing::debug;

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Apply overrides from any variable source
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying environment overrides");

        if let Some(url) = lookup("LITELLM_PROXY_URL") {
            self.proxy.base_url = url;
        }
        if let Some(key) = lookup("LITELLM_API_KEY").or_else(|| lookup("LITELLM_MASTER_KEY")) {
            self.proxy.api_key = Some(key);
        }
        if let Some(concurrency) = lookup("USER_IMPORT_CONCURRENCY") {
            self.submission.concurrency = concurrency
                .trim()
                .parse()
                .map_err(|e| ImportError::Config(format!("Invalid concurrency: {}", e)))?;
        }
        if let Some(timeout) = lookup("USER_IMPORT_TIMEOUT_SECS") {
            self.submission.timeout = timeout
                .trim()
                .parse()
                .map_err(|e| ImportError::Config(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(delimiter) = lookup("USER_IMPORT_DELIMITER") {
            self.input.delimiter = parse_delimiter(&delimiter)?;
        }

        Ok(())
    }
}

/// Parse a delimiter given as one character, or as `\t` / `tab`
pub fn parse_delimiter(value: &str) -> Result<char> {
    match value {
        "\\t" | "tab" => return Ok('\t'),
        _ => {}
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ImportError::Config(format!(
            "Delimiter must be a single character, got {:?}",
            value
        ))),
    }
}
