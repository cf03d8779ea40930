//! Submission run settings

use super::*;
use crate::core::import::SubmissionConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How rows are pushed to the proxy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSettings {
    /// Rows in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-row timeout in seconds
    #[serde(default = "default_submit_timeout")]
    pub timeout: u64,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout: default_submit_timeout(),
        }
    }
}

impl SubmissionSettings {
    pub fn to_submission_config(&self) -> SubmissionConfig {
        SubmissionConfig::new()
            .with_concurrency(self.concurrency)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}
