//! Configuration data models
//!
//! This module defines all configuration structures used by the importer.

pub mod input;
pub mod proxy;
pub mod submission;

pub use input::*;
pub use proxy::*;
pub use submission::*;

/// Default LiteLLM proxy address
pub fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

/// Default connect timeout in seconds
pub fn default_connect_timeout() -> u64 {
    10
}

/// Default number of rows in flight
pub fn default_concurrency() -> usize {
    1
}

/// Default per-row timeout in seconds
pub fn default_submit_timeout() -> u64 {
    30
}

pub fn default_delimiter() -> char {
    ','
}
