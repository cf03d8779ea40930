//! Batch container and its read-only view

use super::decoder::decode;
use super::report::{BatchReport, summarize};
use super::store::SubmissionStore;
use super::types::{DecodeError, Record, SubmissionState, ValidationOutcome};
use super::validator::validate;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// A validated row and its position in the source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub record: Record,
    pub outcome: ValidationOutcome,
}

/// One import session: fixed rows plus their live submission state
///
/// Rows are never added or removed after construction; only the
/// submission state of each row changes while a run is in progress.
#[derive(Debug)]
pub struct Batch {
    id: Uuid,
    entries: Arc<[BatchEntry]>,
    store: Arc<SubmissionStore>,
}

impl Batch {
    /// Build a batch from validator output, keeping its order
    pub fn new(validated: Vec<(Record, ValidationOutcome)>) -> Self {
        let entries: Arc<[BatchEntry]> = validated
            .into_iter()
            .map(|(record, outcome)| BatchEntry { record, outcome })
            .collect();
        let store = Arc::new(SubmissionStore::new(entries.len()));

        Self {
            id: Uuid::new_v4(),
            entries,
            store,
        }
    }

    /// Decode and validate `raw_text` in one step
    pub fn from_text(raw_text: &str, delimiter: char) -> Result<Self, DecodeError> {
        let rows = decode(raw_text, delimiter)?;
        Ok(Self::new(validate(&rows)))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// Indices of rows eligible for submission, in file order
    pub fn valid_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.outcome.is_valid())
            .map(|(index, _)| index)
    }

    pub fn valid_count(&self) -> usize {
        self.valid_indices().count()
    }

    pub(crate) fn store(&self) -> &SubmissionStore {
        &self.store
    }

    pub fn state(&self, index: usize) -> Option<SubmissionState> {
        self.store.get(index)
    }

    pub fn states(&self) -> Vec<SubmissionState> {
        self.store.snapshot()
    }

    pub fn report(&self) -> BatchReport {
        summarize(&self.entries, &self.store.snapshot())
    }

    /// Read-only handle that stays live while the batch is being run
    pub fn view(&self) -> BatchView {
        BatchView {
            id: self.id,
            entries: Arc::clone(&self.entries),
            store: Arc::clone(&self.store),
        }
    }
}

/// Everything a caller needs to render one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowStatus {
    pub index: usize,
    pub record: Record,
    pub outcome: ValidationOutcome,
    pub state: SubmissionState,
}

/// Read-only window onto a batch, safe to hold during a run
#[derive(Debug, Clone)]
pub struct BatchView {
    id: Uuid,
    entries: Arc<[BatchEntry]>,
    store: Arc<SubmissionStore>,
}

impl BatchView {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<SubmissionState> {
        self.store.get(index)
    }

    pub fn states(&self) -> Vec<SubmissionState> {
        self.store.snapshot()
    }

    /// All rows with their state, from a single consistent snapshot
    pub fn snapshot(&self) -> Vec<RowStatus> {
        self.entries
            .iter()
            .zip(self.store.snapshot())
            .enumerate()
            .map(|(index, (entry, state))| RowStatus {
                index,
                record: entry.record.clone(),
                outcome: entry.outcome.clone(),
                state,
            })
            .collect()
    }

    pub fn report(&self) -> BatchReport {
        summarize(&self.entries, &self.store.snapshot())
    }
}
