//! Helper functions for creating specific error types

use super::types::ImportError;

impl ImportError {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
