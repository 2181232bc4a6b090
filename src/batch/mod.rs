//! Batch coordination: sequential fetching, progress reporting, and the final bulk commit.
//!
//! A run walks its items strictly in order on a single worker:
//!
//! 1. poll the [`CancelCheck`]; stop before the item if it fires
//! 2. fetch and classify the item through the [`IconFetcher`]
//! 3. update the counters and call [`BatchObserver::on_progress`]
//!
//! Whatever ends the loop (natural completion, cancellation, or a fault raised
//! by the fetcher) the run finalizes once: every icon collected so far is
//! handed to the [`IconStore`] in a single call, and
//! [`BatchObserver::on_complete`] receives the [`BatchResult`].

mod cancel;
mod observer;

pub use cancel::{CancelCheck, cancel_on_signal};
pub use observer::{BatchObserver, NoopObserver};

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{HttpIconFetcher, IconFetcher};
use crate::progress::ProgressTracker;
use crate::store::IconStore;
use crate::types::{BatchResult, BatchStatus, FetchOutcome, FetchedIcon, IconId, WorkItem};
use std::sync::Arc;

/// Drives batch runs against a fetcher and a store (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct BatchRunner {
    /// Per-item icon retrieval
    fetcher: Arc<dyn IconFetcher>,
    /// Destination of the final bulk commit
    store: Arc<dyn IconStore>,
}

impl BatchRunner {
    /// Create a runner from explicit collaborators
    pub fn new(fetcher: Arc<dyn IconFetcher>, store: Arc<dyn IconStore>) -> Self {
        Self { fetcher, store }
    }

    /// Create a runner that fetches over HTTP according to `config`
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be built
    pub fn from_config(config: &Config, store: Arc<dyn IconStore>) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpIconFetcher::new(&config.fetch)?;
        Ok(Self::new(Arc::new(fetcher), store))
    }

    /// Run a batch on a dedicated tokio task
    ///
    /// Callbacks are invoked from that task; hosts with thread-affine UIs must
    /// marshal them themselves.
    pub fn spawn<C, O>(
        &self,
        items: Vec<WorkItem>,
        cancel: C,
        observer: O,
    ) -> tokio::task::JoinHandle<BatchResult>
    where
        C: CancelCheck + 'static,
        O: BatchObserver + 'static,
    {
        let runner = self.clone();
        tokio::spawn(async move { runner.run(&items, &cancel, &observer).await })
    }

    /// Process `items` in order until they run out, `cancel` fires, or a fault occurs
    ///
    /// `observer.on_progress` is called once per processed item and
    /// `observer.on_complete` exactly once at the end. The same result is
    /// returned to the caller.
    pub async fn run(
        &self,
        items: &[WorkItem],
        cancel: &dyn CancelCheck,
        observer: &dyn BatchObserver,
    ) -> BatchResult {
        let total = items.len();
        let mut tracker = ProgressTracker::new(total);
        let mut icons: Vec<FetchedIcon> = Vec::with_capacity(total);

        if items.is_empty() {
            tracing::info!("no items to process");
            let result = BatchResult {
                status: BatchStatus::Completed,
                progress: tracker.snapshot(),
                icons,
            };
            observer.on_complete(&result);
            return result;
        }

        tracing::info!(total, "starting icon batch");

        let mut status = BatchStatus::Completed;
        for item in items {
            if cancel.is_cancelled() {
                status = BatchStatus::Cancelled;
                break;
            }

            let outcome = match self.fetcher.fetch(item).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(item = %item.id, error = %e, "batch aborted");
                    status = BatchStatus::Faulted {
                        error: e.to_string(),
                    };
                    break;
                }
            };

            tracker.record(&outcome);
            let kind = outcome.kind();
            if let FetchOutcome::Success(data) = outcome {
                icons.push(FetchedIcon {
                    item: item.clone(),
                    icon_id: IconId::generate(),
                    data,
                });
            }

            let progress = tracker.snapshot();
            tracing::debug!(
                item = %item.id,
                outcome = kind,
                percent = progress.percent,
                success = progress.success,
                not_found = progress.not_found,
                error = progress.error,
                "batch progress"
            );
            observer.on_progress(progress);
        }

        let status = self.commit(&icons, status).await;
        let result = BatchResult {
            status,
            progress: tracker.snapshot(),
            icons,
        };

        match &result.status {
            BatchStatus::Faulted { error } => {
                tracing::info!(error = %error, processed = tracker.processed(), "icon batch failed")
            }
            other => {
                tracing::info!(processed = tracker.processed(), total, "icon batch {}", other.label())
            }
        }

        observer.on_complete(&result);
        result
    }

    /// Hand every collected icon to the store in one call.
    ///
    /// The store is only asked to refresh after a successful commit. A commit
    /// failure turns a completed run into a faulted one; a run that already
    /// stopped for another reason keeps its status.
    async fn commit(&self, icons: &[FetchedIcon], status: BatchStatus) -> BatchStatus {
        match self.store.add_icons(icons.to_vec()).await {
            Ok(()) => {
                self.store.mark_needs_refresh().await;
                status
            }
            Err(e) => {
                tracing::error!(error = %e, icons = icons.len(), "failed to commit icons");
                match status {
                    BatchStatus::Completed => BatchStatus::Faulted {
                        error: e.to_string(),
                    },
                    other => other,
                }
            }
        }
    }
}
