//! Aggregate counts derived from a batch snapshot

use super::batch::BatchEntry;
use super::types::SubmissionState;
use serde::Serialize;
use std::fmt;

/// Outcome counts for one batch at one moment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Rows in the batch
    pub total: usize,
    /// Rows that passed validation
    pub valid_count: usize,
    /// Rows that failed validation
    pub invalid_count: usize,
    /// Rows created downstream
    pub succeeded: usize,
    /// Rows the creation service or transport failed
    pub failed: usize,
    /// Rows dispatched and awaiting an answer
    pub pending: usize,
    /// Valid rows not dispatched (yet, or ever after cancellation)
    pub not_submitted: usize,
}

impl BatchReport {
    /// Every valid row reached `Succeeded` or `Failed`
    ///
    /// A cancelled run that left rows `NotSubmitted` is over but not settled.
    pub fn is_settled(&self) -> bool {
        self.pending == 0 && self.not_submitted == 0
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} valid={} invalid={} succeeded={} failed={} pending={} not_submitted={}",
            self.total,
            self.valid_count,
            self.invalid_count,
            self.succeeded,
            self.failed,
            self.pending,
            self.not_submitted
        )
    }
}

/// Count outcomes; `states` is indexed like `entries`
pub fn summarize(entries: &[BatchEntry], states: &[SubmissionState]) -> BatchReport {
    let mut report = BatchReport {
        total: entries.len(),
        ..BatchReport::default()
    };

    for (entry, state) in entries.iter().zip(states) {
        if !entry.outcome.is_valid() {
            report.invalid_count += 1;
            continue;
        }

        report.valid_count += 1;
        match state {
            SubmissionState::NotSubmitted => report.not_submitted += 1,
            SubmissionState::Pending => report.pending += 1,
            SubmissionState::Succeeded => report.succeeded += 1,
            SubmissionState::Failed(_) => report.failed += 1,
        }
    }

    report
}
