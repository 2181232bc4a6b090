//! Per-run progress counters.
//!
//! The tracker is owned by the batch worker; observers only ever see
//! [`ProgressState`] snapshots copied out of it.

use crate::types::{FetchOutcome, ProgressState};

/// Mutable success/not-found/error counters for one batch run
#[derive(Debug)]
pub struct ProgressTracker {
    success: usize,
    not_found: usize,
    error: usize,
    total: usize,
}

impl ProgressTracker {
    /// Start counting a batch of `total` items
    pub fn new(total: usize) -> Self {
        Self {
            success: 0,
            not_found: 0,
            error: 0,
            total,
        }
    }

    /// Count one classified item
    pub fn record(&mut self, outcome: &FetchOutcome) {
        debug_assert!(
            self.processed() < self.total,
            "recorded more outcomes than items in the batch"
        );
        match outcome {
            FetchOutcome::Success(_) => self.success += 1,
            FetchOutcome::NotFound => self.not_found += 1,
            FetchOutcome::Error(_) => self.error += 1,
        }
    }

    /// Items counted so far
    pub fn processed(&self) -> usize {
        self.success + self.not_found + self.error
    }

    /// Copy the counters into an immutable snapshot
    pub fn snapshot(&self) -> ProgressState {
        ProgressState {
            success: self.success,
            not_found: self.not_found,
            error: self.error,
            total: self.total,
            percent: percent_of(self.processed(), self.total),
        }
    }
}

/// Whole-number percentage of `done` out of `total`, truncated toward zero.
///
/// An empty batch never reports progress; it is treated as finished.
pub fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (done.min(total) as u128 * 100) / total as u128;
    pct as u8
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_truncates_like_integer_division() {
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 66);
        assert_eq!(percent_of(3, 3), 100);
        assert_eq!(percent_of(0, 7), 0);
        assert_eq!(percent_of(199, 200), 99);
    }

    #[test]
    fn percent_never_exceeds_100() {
        assert_eq!(percent_of(5, 3), 100);
        assert_eq!(percent_of(0, 0), 100);
    }

    #[test]
    fn percent_handles_huge_totals_without_overflow() {
        assert_eq!(percent_of(usize::MAX / 2, usize::MAX), 49);
    }

    #[test]
    fn tracker_counts_each_bucket() {
        let mut tracker = ProgressTracker::new(4);
        assert_eq!(tracker.snapshot(), ProgressState {
            total: 4,
            ..Default::default()
        });

        tracker.record(&FetchOutcome::NotFound);
        tracker.record(&FetchOutcome::Success(b"icon".to_vec()));
        tracker.record(&FetchOutcome::Error("connection refused".into()));

        let state = tracker.snapshot();
        assert_eq!(state.success, 1);
        assert_eq!(state.not_found, 1);
        assert_eq!(state.error, 1);
        assert_eq!(state.total, 4);
        assert_eq!(state.percent, 75);
        assert_eq!(tracker.processed(), 3);
    }

    #[test]
    fn snapshots_are_detached_from_the_tracker() {
        let mut tracker = ProgressTracker::new(2);
        tracker.record(&FetchOutcome::NotFound);
        let first = tracker.snapshot();
        tracker.record(&FetchOutcome::NotFound);

        assert_eq!(first.not_found, 1);
        assert_eq!(first.percent, 50);
        assert_eq!(tracker.snapshot().percent, 100);
    }
}
