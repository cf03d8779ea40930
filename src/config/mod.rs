//! Configuration management for the importer
//!
//! Sources in increasing precedence: built-in defaults, a YAML file, the
//! environment, then command line flags (applied by the binary).

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the importer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Proxy connection
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Submission run
    #[serde(default)]
    pub submission: SubmissionSettings,
    /// Input file format
    #[serde(default)]
    pub input: InputSettings,
}

impl Config {
    /// Load configuration from a YAML file, then validate it
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path).await?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load a YAML file without validating it
    ///
    /// Use this when later layers (environment, flags) may still override
    /// the file, and validate once they are applied.
    pub async fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ImportError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ImportError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(ImportError::Config)
    }

    /// Convert to YAML string; the API key is never written out
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
