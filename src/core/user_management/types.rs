//! Request bodies sent to the proxy

use crate::core::import::Record;
use serde::Serialize;
use serde_json::Value;

/// Body of `POST /user/new`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUserRequest {
    pub user_email: String,
    pub user_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_invite_email: Option<bool>,
}

impl NewUserRequest {
    /// Build the body for one record
    ///
    /// Metadata that parses as JSON is forwarded as JSON; anything else is
    /// forwarded as a JSON string.
    pub fn from_record(record: &Record, send_invite_email: bool) -> Self {
        Self {
            user_email: record.identifier.clone(),
            user_role: record.role.clone(),
            teams: record.group_ref.as_ref().map(|team| vec![team.clone()]),
            metadata: record.metadata.as_deref().map(|raw| {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            }),
            send_invite_email: send_invite_email.then_some(true),
        }
    }
}
