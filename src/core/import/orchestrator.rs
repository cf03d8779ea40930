//! Submission orchestration
//!
//! Valid rows are claimed in file order by a pool of at most `concurrency`
//! in-flight submissions. A row becomes `Pending` at the moment it is
//! claimed, before the downstream call starts, and becomes `Succeeded` or
//! `Failed` when that call resolves. Completion order is arbitrary once
//! `concurrency > 1`, so every update carries its row index.

use super::batch::{Batch, BatchView};
use super::report::BatchReport;
use super::submitter::RecordSubmitter;
use super::types::{FailureDetail, FailureKind, StateUpdate, SubmissionState, SubmitError};
use crate::utils::error::{ImportError, Result};
use futures::future;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

/// Detail shown for transport failures; the underlying error is only logged
pub const REQUEST_FAILED: &str = "request failed";

/// Detail shown when the service rejects without saying why
pub const REQUEST_REJECTED: &str = "request rejected";

/// Configuration for a submission run
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// Maximum rows in flight at once (default: 1)
    pub concurrency: usize,
    /// Timeout per submission (default: 30s)
    pub timeout: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout: Duration::from_secs(30),
        }
    }
}

impl SubmissionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set timeout per submission
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Drives the valid rows of a batch through a [`RecordSubmitter`]
#[derive(Debug, Clone, Default)]
pub struct SubmissionOrchestrator {
    config: SubmissionConfig,
}

impl SubmissionOrchestrator {
    pub fn new(config: SubmissionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    /// Submit every valid row of `batch` and return the final report
    ///
    /// Each state change is sent to `updates` when a sender is given.
    /// Cancelling `cancel` stops new dispatches; calls already in flight
    /// run to completion and rows never claimed stay `NotSubmitted`.
    pub async fn run<S>(
        &self,
        batch: &Batch,
        submitter: &S,
        cancel: &CancellationToken,
        updates: Option<&mpsc::UnboundedSender<StateUpdate>>,
    ) -> BatchReport
    where
        S: RecordSubmitter + ?Sized,
    {
        let span = info_span!("submission_run", batch_id = %batch.id());
        self.run_inner(batch, submitter, cancel, updates)
            .instrument(span)
            .await
    }

    async fn run_inner<S>(
        &self,
        batch: &Batch,
        submitter: &S,
        cancel: &CancellationToken,
        updates: Option<&mpsc::UnboundedSender<StateUpdate>>,
    ) -> BatchReport
    where
        S: RecordSubmitter + ?Sized,
    {
        let concurrency = self.config.concurrency.max(1);
        let timeout = self.config.timeout;
        let eligible = batch.valid_count();
        info!(
            "Submitting {} of {} rows (concurrency {}, timeout {:?})",
            eligible,
            batch.len(),
            concurrency,
            timeout
        );

        let start = Instant::now();

        stream::iter(batch.valid_indices())
            .take_while(move |_| future::ready(!cancel.is_cancelled()))
            .filter_map(move |index| future::ready(claim(batch, index, updates).then_some(index)))
            .map(move |index| submit_row(batch, submitter, index, timeout, updates))
            .buffer_unordered(concurrency)
            .for_each(|_| future::ready(()))
            .await;

        let report = batch.report();
        if cancel.is_cancelled() {
            info!(
                "Run cancelled after {:?}; {} valid rows left unsubmitted",
                start.elapsed(),
                report.not_submitted
            );
        } else {
            info!("Run finished in {:?}: {}", start.elapsed(), report);
        }
        report
    }

    /// Run on a Tokio task, handing the caller a live view and update stream
    pub fn spawn(
        &self,
        batch: Batch,
        submitter: Arc<dyn RecordSubmitter>,
        cancel: CancellationToken,
    ) -> SubmissionRun {
        let (sender, receiver) = mpsc::unbounded_channel();
        let view = batch.view();
        let orchestrator = self.clone();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            orchestrator
                .run(&batch, submitter.as_ref(), &token, Some(&sender))
                .await
        });

        SubmissionRun {
            updates: receiver,
            view,
            cancel,
            handle,
        }
    }
}

/// Mark a row `Pending`; false when it was already claimed by an earlier run
fn claim(
    batch: &Batch,
    index: usize,
    updates: Option<&mpsc::UnboundedSender<StateUpdate>>,
) -> bool {
    match batch.store().transition(index, SubmissionState::Pending) {
        Ok(()) => {
            debug!("Dispatching row {} (line {})", index, batch.entries()[index].record.line);
            publish(updates, index, SubmissionState::Pending);
            true
        }
        Err(e) => {
            warn!("Skipping row {}: {}", index, e);
            false
        }
    }
}

async fn submit_row<S>(
    batch: &Batch,
    submitter: &S,
    index: usize,
    timeout: Duration,
    updates: Option<&mpsc::UnboundedSender<StateUpdate>>,
) where
    S: RecordSubmitter + ?Sized,
{
    let record = &batch.entries()[index].record;

    let state = match tokio::time::timeout(timeout, submitter.submit(record)).await {
        Ok(Ok(())) => {
            debug!("Row {} created: {}", index, record.identifier);
            SubmissionState::Succeeded
        }
        Ok(Err(SubmitError::Rejected { status, message })) => {
            warn!(
                "Row {} (line {}) rejected (status {:?}): {}",
                index, record.line, status, message
            );
            let message = if message.trim().is_empty() {
                REQUEST_REJECTED.to_string()
            } else {
                message
            };
            SubmissionState::Failed(FailureDetail::new(FailureKind::Rejected, message))
        }
        Ok(Err(SubmitError::Transport(cause))) => {
            warn!("Row {} (line {}) transport error: {}", index, record.line, cause);
            SubmissionState::Failed(FailureDetail::new(FailureKind::Transport, REQUEST_FAILED))
        }
        Err(_) => {
            warn!("Row {} (line {}) timed out after {:?}", index, record.line, timeout);
            SubmissionState::Failed(FailureDetail::new(
                FailureKind::Timeout,
                format!("request timed out after {:?}", timeout),
            ))
        }
    };

    // Only this task owns a claimed row, so Pending -> terminal cannot race.
    match batch.store().transition(index, state.clone()) {
        Ok(()) => publish(updates, index, state),
        Err(e) => warn!("Dropping result for row {}: {}", index, e),
    }
}

fn publish(
    updates: Option<&mpsc::UnboundedSender<StateUpdate>>,
    index: usize,
    state: SubmissionState,
) {
    if let Some(sender) = updates {
        // A dropped receiver only means nobody is watching.
        let _ = sender.send(StateUpdate { index, state });
    }
}

/// Handle to a run started with [`SubmissionOrchestrator::spawn`]
pub struct SubmissionRun {
    updates: mpsc::UnboundedReceiver<StateUpdate>,
    view: BatchView,
    cancel: CancellationToken,
    handle: JoinHandle<BatchReport>,
}

impl SubmissionRun {
    /// Next state change; `None` once the run is over and all updates drained
    pub async fn next_update(&mut self) -> Option<StateUpdate> {
        self.updates.recv().await
    }

    pub fn view(&self) -> &BatchView {
        &self.view
    }

    /// Stop dispatching new rows
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the run to end and return its final report
    pub async fn finish(self) -> Result<BatchReport> {
        self.handle
            .await
            .map_err(|e| ImportError::internal(format!("submission task failed: {}", e)))
    }
}
