//! Status poller
//!
//! Polls the review API on a fixed interval and relays status changes of the
//! most recent submission. One cycle runs fully before the next starts; the
//! shutdown signal is only observed between cycles, never mid-request.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info};

use crate::config::{Config, StartAt};
use crate::repository::{Notifier, StatusFeed};
use reviewwatch_client::ClientError;
use reviewwatch_core::domain::checkpoint::Checkpoint;
use reviewwatch_core::domain::homework::UnknownStatusError;
use reviewwatch_core::dto::feed::{ShapeError, decode_feed};

/// Prefix of the operator alert sent when the upstream contract looks broken
const PROGRAM_FAILURE: &str = "Сбой в работе программы";

/// Everything that can fail inside one poll cycle
///
/// All of these surface at the loop boundary; none propagate out of the
/// process under normal operation.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatusError),
}

impl CycleError {
    /// Transient errors resolve by waiting and re-polling. Contract
    /// violations additionally warrant an operator alert.
    fn is_contract_violation(&self) -> bool {
        match self {
            CycleError::Client(e) => !e.is_retryable(),
            CycleError::Shape(_) | CycleError::UnknownStatus(_) => true,
        }
    }
}

/// Outcome of one completed poll cycle
#[derive(Debug, PartialEq, Eq)]
enum CycleOutcome {
    /// A changed verdict was delivered
    Notified,
    /// The latest verdict matches the last delivered message
    Duplicate,
    /// The feed carried no homework entries
    NothingNew,
    /// A changed verdict could not be delivered; the unchanged last-message
    /// checkpoint makes the next cycle retry it
    Undelivered,
}

/// Poller that owns the last-seen checkpoint and drives the poll cycle
pub struct StatusPoller {
    config: Config,
    feed: Arc<dyn StatusFeed>,
    notifier: Arc<dyn Notifier>,
    checkpoint: Checkpoint,
}

impl StatusPoller {
    /// Creates a poller with a fresh checkpoint.
    pub fn new(config: Config, feed: Arc<dyn StatusFeed>, notifier: Arc<dyn Notifier>) -> Self {
        let checkpoint = match config.start_at {
            StartAt::Zero => Checkpoint::new(),
            StartAt::Now => Checkpoint::starting_now(),
        };
        Self {
            config,
            feed,
            notifier,
            checkpoint,
        }
    }

    /// Runs the poll loop until the shutdown signal flips.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Starting status poller (interval: {:?})",
            self.config.poll_interval
        );

        loop {
            match self.poll_once().await {
                Ok(CycleOutcome::Notified) => info!("Status change delivered"),
                Ok(CycleOutcome::Duplicate) => debug!("Latest status already delivered"),
                Ok(CycleOutcome::NothingNew) => debug!("No status changes"),
                Ok(CycleOutcome::Undelivered) => {}
                Err(e) => self.handle_cycle_error(e).await,
            }

            tokio::select! {
                _ = time::sleep(self.config.poll_interval) => {}
                _ = shutdown.changed() => {
                    info!("Shutdown signal received, stopping poller");
                    break;
                }
            }
        }
    }

    /// Performs a single poll cycle: fetch, decode, interpret, notify.
    ///
    /// The checkpoint is only touched by validated iterations, so any error
    /// leaves the next cycle re-fetching the same window.
    async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let from_date = self.checkpoint.last_timestamp();
        debug!(from_date, "Polling for status changes");

        let raw = self.feed.fetch(from_date).await?;
        let page = decode_feed(&raw)?;

        // The API returns most-recent-first; only the head is of interest
        let Some(latest) = page.homeworks.first() else {
            if let Some(current_date) = page.current_date {
                self.checkpoint.advance_to(current_date);
            }
            return Ok(CycleOutcome::NothingNew);
        };

        let verdict = latest.verdict()?;

        if self.checkpoint.is_duplicate(&verdict) {
            if let Some(current_date) = page.current_date {
                self.checkpoint.advance_to(current_date);
            }
            return Ok(CycleOutcome::Duplicate);
        }

        let outcome = match self.notifier.send(&verdict).await {
            Ok(()) => {
                info!(message = %verdict, "Notification sent");
                self.checkpoint.record_message(verdict);
                CycleOutcome::Notified
            }
            Err(e) => {
                error!(message = %verdict, "Failed to deliver notification: {e}");
                CycleOutcome::Undelivered
            }
        };

        if let Some(current_date) = page.current_date {
            self.checkpoint.advance_to(current_date);
        }

        Ok(outcome)
    }

    /// Classifies a failed cycle at the loop boundary.
    ///
    /// Transient upstream trouble is logged and waited out. A contract
    /// violation is also forwarded to the chat, since the process will not
    /// recover from an upstream change on its own. A failure sending that
    /// alert is itself only logged.
    async fn handle_cycle_error(&self, error: CycleError) {
        error!("Poll cycle failed: {error}");

        if error.is_contract_violation() {
            let alert = format!("{PROGRAM_FAILURE}: {error}.");
            if let Err(e) = self.notifier.send(&alert).await {
                error!("Failed to deliver failure alert: {e}");
            }
        }
    }
}
