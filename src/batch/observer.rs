//! Progress and completion sinks.

use crate::types::{BatchResult, Event, ProgressState};
use std::sync::Arc;

/// Receiver of batch callbacks.
///
/// These are the only two callbacks a run makes. Both run on the batch worker,
/// in order: one `on_progress` per processed item, then exactly one
/// `on_complete` after the icons have been committed. Implementations should
/// return quickly; the next fetch does not start until `on_progress` returns.
pub trait BatchObserver: Send + Sync {
    /// An item was classified; `progress` includes it
    fn on_progress(&self, progress: ProgressState);

    /// The run ended and its icons were handed to the store
    fn on_complete(&self, result: &BatchResult);
}

/// Observer that ignores every callback
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn on_progress(&self, _progress: ProgressState) {}

    fn on_complete(&self, _result: &BatchResult) {}
}

impl<T: BatchObserver + ?Sized> BatchObserver for Arc<T> {
    fn on_progress(&self, progress: ProgressState) {
        (**self).on_progress(progress)
    }

    fn on_complete(&self, result: &BatchResult) {
        (**self).on_complete(result)
    }
}

/// Forward callbacks as [`Event`]s to every broadcast subscriber.
///
/// Sending never blocks; events are dropped when nobody is subscribed.
impl BatchObserver for tokio::sync::broadcast::Sender<Event> {
    fn on_progress(&self, progress: ProgressState) {
        self.send(Event::Progress { progress }).ok();
    }

    fn on_complete(&self, result: &BatchResult) {
        self.send(Event::Finished {
            status: result.status.clone(),
            progress: result.progress,
            icons: result.icons.len(),
        })
        .ok();
    }
}
