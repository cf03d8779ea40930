//! # LiteLLM User Import
//!
//! Bulk user creation for a LiteLLM proxy from a delimited text file.
//!
//! ## Features
//!
//! - **Tolerant decoding**: case-insensitive headers with aliases, quoted fields, any delimiter
//! - **Row validation**: every row gets a verdict and a list of reasons, nothing is dropped
//! - **Bounded submission**: valid rows go out in file order with a configurable concurrency
//! - **Live status**: per-row state and a running report readable while the run is in flight
//! - **Cancellation**: stops dispatching new rows and lets in-flight rows settle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use litellm_user_import::{Batch, Config, ProxyUserClient, SubmissionOrchestrator};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/user-import.yaml").await?;
//!     let text = std::fs::read_to_string("users.csv")?;
//!
//!     let batch = Batch::from_text(&text, config.input.delimiter)?;
//!     let client = ProxyUserClient::new(&config.proxy)?;
//!     let orchestrator = SubmissionOrchestrator::new(config.submission.to_submission_config());
//!
//!     let report = orchestrator
//!         .run(&batch, &client, &CancellationToken::new(), None)
//!         .await;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{ImportError, Result};

pub use core::import::{
    Batch, BatchEntry, BatchReport, BatchView, Column, DecodeError, FailureDetail, FailureKind,
    RawRow, Record, RecordSubmitter, RowStatus, StateUpdate, SubmissionConfig,
    SubmissionOrchestrator, SubmissionRun, SubmissionState, SubmitError, ValidationOutcome,
    decode, export_results, summarize, template, validate,
};
pub use core::user_management::{NewUserRequest, ProxyUserClient, UserRole};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Unix timestamp of the build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
