//! Core functionality for the importer
//!
//! `import` holds the decode, validate and submit pipeline; `user_management`
//! talks to the proxy.

pub mod import;
pub mod user_management;
