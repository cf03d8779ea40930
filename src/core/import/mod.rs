//! Batch user import pipeline
//!
//! Decoding, validation, and orchestrated submission with per-row status
//! tracking. Only decode errors stop a batch; every other failure is
//! recorded against the row it belongs to.

mod batch;
mod decoder;
mod export;
mod orchestrator;
mod report;
mod store;
mod submitter;
mod template;
mod types;
mod validator;


pub use batch::{Batch, BatchEntry, BatchView, RowStatus};
pub use decoder::{Column, decode, encode_field, encode_line};
pub use export::{RESULTS_HEADER, export_results};
pub use orchestrator::{
    REQUEST_FAILED, REQUEST_REJECTED, SubmissionConfig, SubmissionOrchestrator, SubmissionRun,
};
pub use report::{BatchReport, summarize};
pub use store::SubmissionStore;
pub use submitter::RecordSubmitter;
pub use template::{TEMPLATE_HEADER, template};
pub use types::{
    DecodeError, FailureDetail, FailureKind, RawRow, Record, StateUpdate, SubmissionState,
    SubmitError, ValidationOutcome,
};
pub use validator::{IDENTIFIER_NOT_EMAIL, IDENTIFIER_REQUIRED, ROLE_REQUIRED, check, validate};
