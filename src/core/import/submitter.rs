//! Contract for the downstream record creation service

use super::types::{Record, SubmitError};
use async_trait::async_trait;
use std::sync::Arc;

/// Creates one record downstream
///
/// Implementations make a single attempt per call. The orchestrator never
/// retries, so a call that returns an error is final for that row.
#[async_trait]
pub trait RecordSubmitter: Send + Sync {
    async fn submit(&self, record: &Record) -> Result<(), SubmitError>;
}

#[async_trait]
impl<T: RecordSubmitter + ?Sized> RecordSubmitter for Arc<T> {
    async fn submit(&self, record: &Record) -> Result<(), SubmitError> {
        (**self).submit(record).await
    }
}
