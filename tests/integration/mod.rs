//! Integration tests for litellm-user-import
//!
//! These tests go through the public API only.

pub mod config_tests;
pub mod pipeline_tests;
