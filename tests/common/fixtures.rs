//! Test fixtures and data factories

use async_trait::async_trait;
use litellm_user_import::{Record, RecordSubmitter, SubmitError};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Builds delimited input text row by row
pub struct CsvBuilder {
    delimiter: char,
    lines: Vec<String>,
}

impl CsvBuilder {
    /// Start with the canonical header
    pub fn new() -> Self {
        Self::with_header(&["identifier", "role", "group_ref", "metadata"])
    }

    pub fn with_header(columns: &[&str]) -> Self {
        Self {
            delimiter: ',',
            lines: vec![columns.join(",")],
        }
    }

    /// Switch delimiter; applies to the header and every later row
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        if let Some(header) = self.lines.first_mut() {
            *header = header.replace(',', &delimiter.to_string());
        }
        self
    }

    pub fn row(mut self, fields: &[&str]) -> Self {
        self.lines.push(fields.join(&self.delimiter.to_string()));
        self
    }

    /// `count` valid rows `user{n}@example.com`
    pub fn users(mut self, count: usize) -> Self {
        for n in 0..count {
            let email = format!("user{}@example.com", n);
            self = self.row(&[email.as_str(), "internal_user", "", ""]);
        }
        self
    }

    pub fn build(&self) -> String {
        self.lines.join("\n")
    }
}

impl Default for CsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Records every call; rejects identifiers it was told to reject
#[derive(Default)]
pub struct RecordingSubmitter {
    rejections: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(mut self, identifier: &str, message: &str) -> Self {
        self.rejections
            .insert(identifier.to_string(), message.to_string());
        self
    }

    /// Identifiers in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RecordSubmitter for RecordingSubmitter {
    async fn submit(&self, record: &Record) -> Result<(), SubmitError> {
        self.calls.lock().push(record.identifier.clone());
        tokio::task::yield_now().await;

        match self.rejections.get(&record.identifier) {
            Some(message) => Err(SubmitError::rejected(Some(400), message.clone())),
            None => Ok(()),
        }
    }
}
