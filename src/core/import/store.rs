//! Per-row submission state shared between workers and readers

use super::types::SubmissionState;
use crate::utils::error::{ImportError, Result};
use parking_lot::RwLock;

/// Submission state for every row of a batch, indexed by row position
///
/// Workers only ever write the row they claimed, and every write goes
/// through [`SubmissionStore::transition`], which enforces the lifecycle.
/// Readers get a consistent copy of all rows via [`SubmissionStore::snapshot`].
#[derive(Debug)]
pub struct SubmissionStore {
    states: RwLock<Vec<SubmissionState>>,
}

impl SubmissionStore {
    /// Create a store with every row `NotSubmitted`
    pub fn new(len: usize) -> Self {
        Self {
            states: RwLock::new(vec![SubmissionState::NotSubmitted; len]),
        }
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<SubmissionState> {
        self.states.read().get(index).cloned()
    }

    /// Copy of all rows taken under one read lock
    pub fn snapshot(&self) -> Vec<SubmissionState> {
        self.states.read().clone()
    }

    /// Move a row to `next`, rejecting moves the lifecycle does not allow
    pub fn transition(&self, index: usize, next: SubmissionState) -> Result<()> {
        let mut states = self.states.write();
        let len = states.len();
        let current = states
            .get_mut(index)
            .ok_or(ImportError::RowOutOfRange { index, len })?;

        if !current.can_transition_to(&next) {
            return Err(ImportError::InvalidTransition {
                index,
                from: current.name(),
                to: next.name(),
            });
        }

        *current = next;
        Ok(())
    }
}
