//! Result reading and post-submission polling.
//!
//! The provider's result becomes visible some time after the transaction is
//! accepted, so a submission is followed by a fixed schedule of re-reads.
//! Each poll is its own task. Cancelling a schedule stops every poll that has
//! not started reading yet; a read already in flight is left to finish and
//! its result is dropped.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::blockchain::types::{BlockchainError, ChainReader};
use crate::codec::{decode_read_response, DecodeError, Felt};
use crate::config::ContractsConfig;
use crate::observability::metrics;
use crate::vrf::types::RandomNumberResult;

/// Failure of a single read.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Chain(#[from] BlockchainError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result of one scheduled poll.
#[derive(Debug)]
pub struct PollUpdate {
    /// Submission this poll follows.
    pub transaction_hash: Felt,
    /// Position in the delay schedule.
    pub poll_index: usize,
    pub delay: Duration,
    pub result: Result<Option<RandomNumberResult>, ReadError>,
}

/// Reads the target contract's last result.
pub struct ResultReader<R> {
    chain: Arc<R>,
    contract: Felt,
    entrypoint: Arc<str>,
}

impl<R> Clone for ResultReader<R> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            contract: self.contract,
            entrypoint: self.entrypoint.clone(),
        }
    }
}

impl<R: ChainReader + 'static> ResultReader<R> {
    pub fn new(chain: R, contracts: &ContractsConfig) -> Self {
        Self::from_shared(
            Arc::new(chain),
            contracts.target_contract,
            contracts.read_entrypoint.as_str(),
        )
    }

    pub fn from_shared(chain: Arc<R>, contract: Felt, entrypoint: &str) -> Self {
        Self {
            chain,
            contract,
            entrypoint: Arc::from(entrypoint),
        }
    }

    /// Read and decode the last result. `Ok(None)` means nothing produced yet.
    ///
    /// The view takes no arguments; `subject` only tags the read in logs.
    pub async fn fetch(
        &self,
        subject: Option<Felt>,
    ) -> Result<Option<RandomNumberResult>, ReadError> {
        let raw = self.chain.call(self.contract, &self.entrypoint, &[]).await?;
        let decoded = decode_read_response(&raw)?;

        match &decoded {
            Some(result) => tracing::debug!(
                subject = ?subject,
                value = result.value,
                min = result.min,
                max = result.max,
                "Random number read"
            ),
            None => tracing::debug!(subject = ?subject, "No random number produced yet"),
        }
        Ok(decoded)
    }

    /// Re-read the result at each delay after a submission.
    ///
    /// Updates arrive on the returned channel in completion order; the channel
    /// closes once every poll has finished or been cancelled.
    pub fn schedule_polls(
        &self,
        after_hash: Felt,
        delays: &[Duration],
    ) -> (PollHandle, mpsc::UnboundedReceiver<PollUpdate>) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        tracing::debug!(tx_hash = %after_hash, polls = delays.len(), "Scheduling result polls");

        let tasks = delays
            .iter()
            .enumerate()
            .map(|(poll_index, delay)| {
                let reader = self.clone();
                let mut cancel = cancel_rx.clone();
                let updates = update_tx.clone();
                let delay = *delay;

                tokio::spawn(async move {
                    // Cancellation wins when it lands together with the delay.
                    tokio::select! {
                        biased;
                        _ = cancelled(&mut cancel) => {
                            tracing::trace!(tx_hash = %after_hash, poll_index, "Poll cancelled before read");
                            return;
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                    if is_cancelled(&cancel) {
                        return;
                    }

                    let result = reader.fetch(None).await;
                    if is_cancelled(&cancel) {
                        tracing::trace!(tx_hash = %after_hash, poll_index, "Poll result suppressed");
                        return;
                    }

                    metrics::record_poll(match &result {
                        Ok(Some(_)) => "ready",
                        Ok(None) => "absent",
                        Err(_) => "error",
                    });
                    if let Err(e) = &result {
                        tracing::warn!(tx_hash = %after_hash, poll_index, error = %e, "Result poll failed");
                    }

                    let _ = updates.send(PollUpdate {
                        transaction_hash: after_hash,
                        poll_index,
                        delay,
                        result,
                    });
                })
            })
            .collect();

        let handle = PollHandle {
            transaction_hash: after_hash,
            cancel: cancel_tx,
            tasks,
        };
        (handle, update_rx)
    }
}

/// Resolves once the schedule is cancelled or its handle dropped.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

fn is_cancelled(rx: &watch::Receiver<bool>) -> bool {
    *rx.borrow() || rx.has_changed().is_err()
}

/// Owns one poll schedule. Dropping it cancels the schedule.
pub struct PollHandle {
    transaction_hash: Felt,
    cancel: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl PollHandle {
    /// Cancel every poll of this schedule.
    pub fn cancel(&self) {
        if !self.cancel.send_replace(true) {
            tracing::debug!(tx_hash = %self.transaction_hash, "Result polls cancelled");
        }
    }

    pub fn transaction_hash(&self) -> Felt {
        self.transaction_hash
    }

    /// Polls that have not finished yet.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    pub fn is_finished(&self) -> bool {
        self.pending() == 0
    }

    /// Wait for every poll task to exit.
    pub async fn wait(mut self) {
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Poll task panicked");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}
