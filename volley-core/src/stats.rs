use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::outcome::RequestOutcome;

/// Shared accumulation for a run in progress.
///
/// Writers only append or increment; outcome order is completion order and
/// carries no meaning for the final report.
#[derive(Debug, Default)]
pub struct RunStats {
    issued_total: AtomicU64,
    success_total: AtomicU64,
    failed_total: AtomicU64,
    in_flight: AtomicU64,
    frozen: AtomicBool,
    outcomes: Mutex<Vec<RequestOutcome>>,
}

impl RunStats {
    pub fn issued_total(&self) -> u64 {
        self.issued_total.load(Ordering::Relaxed)
    }

    pub fn success_total(&self) -> u64 {
        self.success_total.load(Ordering::Relaxed)
    }

    pub fn failed_total(&self) -> u64 {
        self.failed_total.load(Ordering::Relaxed)
    }

    pub fn completed_total(&self) -> u64 {
        self.success_total().saturating_add(self.failed_total())
    }

    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn record_dispatch(&self) {
        self.issued_total.fetch_add(1, Ordering::Relaxed);
        self.in_flight.fetch_add(1, Ordering::AcqRel);
    }

    pub fn record_outcome(&self, outcome: RequestOutcome) {
        // A completion that loses the race against the drain deadline is
        // dropped rather than mutating an already-frozen collection.
        if !self.frozen.load(Ordering::Acquire) {
            if outcome.result.is_success() {
                self.success_total.fetch_add(1, Ordering::Relaxed);
            } else {
                self.failed_total.fetch_add(1, Ordering::Relaxed);
            }

            let mut outcomes = self
                .outcomes
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !self.frozen.load(Ordering::Acquire) {
                outcomes.push(outcome);
            }
        }

        // Decrement last: once in_flight reaches zero the drain phase may
        // freeze the collection, and this outcome must already be in it.
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }

    /// Closes the collection to further writes and returns the frozen set.
    pub fn freeze(&self) -> Vec<RequestOutcome> {
        let mut outcomes = self
            .outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.frozen.store(true, Ordering::Release);
        std::mem::take(&mut *outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::RequestResult;
    use std::sync::Arc;
    use std::time::Duration;

    fn outcome(result: RequestResult) -> RequestOutcome {
        RequestOutcome {
            endpoint: Arc::from("/health"),
            issued_at: Duration::from_millis(1),
            latency: Duration::from_millis(2),
            result,
        }
    }

    #[test]
    fn counters_track_dispatch_and_completion() {
        let stats = RunStats::default();

        stats.record_dispatch();
        stats.record_dispatch();
        assert_eq!(stats.issued_total(), 2);
        assert_eq!(stats.in_flight(), 2);

        stats.record_outcome(outcome(RequestResult::Success(200)));
        stats.record_outcome(outcome(RequestResult::HttpError(500)));

        assert_eq!(stats.success_total(), 1);
        assert_eq!(stats.failed_total(), 1);
        assert_eq!(stats.completed_total(), 2);
        assert_eq!(stats.in_flight(), 0);
    }

    #[test]
    fn freeze_closes_the_collection() {
        let stats = RunStats::default();

        stats.record_dispatch();
        stats.record_outcome(outcome(RequestResult::Success(200)));

        let frozen = stats.freeze();
        assert_eq!(frozen.len(), 1);

        // Late completions never reach the collection once it is frozen.
        stats.record_dispatch();
        stats.record_outcome(outcome(RequestResult::Timeout));
        assert_eq!(stats.freeze().len(), 0);
        assert_eq!(stats.in_flight(), 0);
    }
}
