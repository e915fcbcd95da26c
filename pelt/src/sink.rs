use crate::error::RequestFailure;
use crate::request::RequestOutcome;
use metrics_util::AtomicBucket;
use std::sync::Arc;
use std::time::Duration;

/// Append-only accumulator shared by every worker of one phase.
///
/// Backed by lock-free buckets, so the record path never takes a lock and
/// concurrent appends are neither lost nor torn.
#[derive(Clone)]
pub(crate) struct ResultSink {
    latencies: Arc<AtomicBucket<Duration>>,
    failures: Arc<AtomicBucket<RequestFailure>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self {
            latencies: Arc::new(AtomicBucket::new()),
            failures: Arc::new(AtomicBucket::new()),
        }
    }

    pub fn record(&self, outcome: RequestOutcome) {
        match outcome {
            RequestOutcome::Success { latency } => self.latencies.push(latency),
            RequestOutcome::Failure(failure) => self.failures.push(failure),
        }
    }

    /// Copy out everything recorded so far. Only meaningful once all
    /// workers of the phase have stopped.
    pub fn snapshot(&self) -> (Vec<Duration>, Vec<RequestFailure>) {
        (self.latencies.data(), self.failures.data())
    }

    /// Discard all recorded results. Called between phases only, never
    /// while a worker may still append.
    pub fn clear(&self) {
        self.latencies.clear_with(|_| {});
        self.failures.clear_with(|_| {});
    }
}
