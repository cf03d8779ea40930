//! Import pipeline types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One decoded data line, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source text
    pub line: usize,
    /// Fields in canonical column order: identifier, role, group_ref, metadata
    pub fields: Vec<String>,
}

/// A user to create, built from one [`RawRow`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Source line the record came from
    pub line: usize,
    /// User email
    pub identifier: String,
    /// Proxy role for the new user
    pub role: String,
    /// Team the user should join
    pub group_ref: Option<String>,
    /// Opaque metadata, forwarded as-is
    pub metadata: Option<String>,
}

/// Result of running the row rules against a [`Record`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reasons", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<String>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Failed rule messages, empty for valid rows
    pub fn reasons(&self) -> &[String] {
        match self {
            ValidationOutcome::Valid => &[],
            ValidationOutcome::Invalid(reasons) => reasons,
        }
    }
}

/// Why a submission ended in [`SubmissionState::Failed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The creation service answered with an error payload
    Rejected,
    /// The call never produced a usable answer
    Transport,
    /// The call exceeded the per-call timeout
    Timeout,
}

/// User-facing failure text plus its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureDetail {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Lifecycle of a row's creation attempt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    NotSubmitted,
    Pending,
    Succeeded,
    Failed(FailureDetail),
}

impl SubmissionState {
    /// Returns true once the row can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    /// Whether the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: &SubmissionState) -> bool {
        matches!(
            (self, next),
            (Self::NotSubmitted, Self::Pending)
                | (Self::Pending, Self::Succeeded)
                | (Self::Pending, Self::Failed(_))
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotSubmitted => "not_submitted",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(detail) => write!(f, "failed: {}", detail),
            other => f.write_str(other.name()),
        }
    }
}

/// One published state change, keyed by row index in the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateUpdate {
    pub index: usize,
    pub state: SubmissionState,
}

/// Input that cannot become a batch at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input is empty: a header row is required")]
    MissingHeader,

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Error returned by a [`RecordSubmitter`](super::RecordSubmitter)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Structured rejection from the creation service
    #[error("rejected: {message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    /// The request did not complete
    #[error("transport error: {0}")]
    Transport(String),
}

impl SubmitError {
    pub fn rejected(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
