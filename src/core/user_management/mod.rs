//! Proxy user management
//!
//! The HTTP side of an import: converts validated records into
//! `/user/new` requests.

mod client;
mod roles;
mod types;

pub use client::ProxyUserClient;
pub use roles::UserRole;
pub use types::NewUserRequest;
