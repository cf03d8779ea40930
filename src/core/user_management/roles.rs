//! Proxy user roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles understood by the LiteLLM `/user/new` endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full admin over the proxy
    ProxyAdmin,
    /// Read-only admin
    ProxyAdminViewer,
    /// Regular user that can create keys
    InternalUser,
    /// Read-only user
    InternalUserViewer,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::ProxyAdmin,
        UserRole::ProxyAdminViewer,
        UserRole::InternalUser,
        UserRole::InternalUserViewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::ProxyAdmin => "proxy_admin",
            UserRole::ProxyAdminViewer => "proxy_admin_viewer",
            UserRole::InternalUser => "internal_user",
            UserRole::InternalUserViewer => "internal_user_viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| format!("unknown role: {}", s.trim()))
    }
}
