//! HTTP client for the LiteLLM user endpoint

use super::roles::UserRole;
use super::types::NewUserRequest;
use crate::config::ProxyConfig;
use crate::core::import::{Record, RecordSubmitter, SubmitError};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Creates proxy users, one request per record
#[derive(Debug, Clone)]
pub struct ProxyUserClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    send_invite_email: bool,
}

impl ProxyUserClient {
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .user_agent(concat!("litellm-user-import/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.user_new_url(),
            api_key: config.api_key.clone(),
            send_invite_email: config.send_invite_email,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecordSubmitter for ProxyUserClient {
    async fn submit(&self, record: &Record) -> std::result::Result<(), SubmitError> {
        if record.role.parse::<UserRole>().is_err() {
            warn!(
                "Row {} uses role {:?}, which the proxy may not recognise",
                record.line, record.role
            );
        }

        let body = NewUserRequest::from_record(record, self.send_invite_email);
        debug!("Creating user {}", body.user_email);

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SubmitError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let error_text = response
            .text()
            .await
            .map_err(|e| SubmitError::transport(e.to_string()))?;
        Err(SubmitError::rejected(
            Some(status.as_u16()),
            extract_error_message(status, &error_text),
        ))
    }
}

/// Pull a readable message out of a LiteLLM error body
pub(crate) fn extract_error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let from_payload = parsed.as_ref().and_then(|value| {
        [
            value.pointer("/error/message"),
            value.get("error"),
            value.pointer("/detail/error"),
            value.pointer("/detail/message"),
            value.get("detail"),
            value.get("message"),
        ]
        .into_iter()
        .flatten()
        .find_map(non_empty_str)
    });

    if let Some(message) = from_payload {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
