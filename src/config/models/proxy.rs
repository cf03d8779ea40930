//! LiteLLM proxy connection settings

use super::*;
use serde::{Deserialize, Serialize};

/// Where users get created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy base URL, without the `/user/new` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Admin key sent as a bearer token
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Ask the proxy to email an invite to each created user
    #[serde(default)]
    pub send_invite_email: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            connect_timeout: default_connect_timeout(),
            send_invite_email: false,
        }
    }
}

impl ProxyConfig {
    /// Full URL of the user creation endpoint
    pub fn user_new_url(&self) -> String {
        format!("{}/user/new", self.base_url.trim_end_matches('/'))
    }
}
