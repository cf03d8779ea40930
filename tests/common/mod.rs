//! Common test utilities for litellm-user-import
//!
//! - Input file builders
//! - A submitter that records calls and answers from a script

pub mod fixtures;

pub use fixtures::{CsvBuilder, RecordingSubmitter};
