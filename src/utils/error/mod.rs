//! Error handling for the importer
//!
//! This module defines the crate-level error type. Row-scoped outcomes
//! (validation failures, rejected submissions) are data, not errors, and
//! never show up here.

mod helpers;
mod types;

pub use types::{ImportError, Result};
