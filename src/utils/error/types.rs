//! Core error type definitions

use crate::core::import::DecodeError;
use thiserror::Error;

/// Result type alias for the importer
pub type Result<T> = std::result::Result<T, ImportError>;

/// Main error type for the importer
#[derive(Error, Debug)]
pub enum ImportError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input file could not be decoded; the batch never starts
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A row was asked to move to a state its lifecycle does not allow
    #[error("Invalid transition for row {index}: {from} -> {to}")]
    InvalidTransition {
        index: usize,
        from: &'static str,
        to: &'static str,
    },

    /// Row index outside the batch
    #[error("Row index {index} out of range for batch of {len}")]
    RowOutOfRange { index: usize, len: usize },

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
