use crate::error::RequestFailure;
use crate::stats::RunStatistics;
use std::time::Duration;

/// Everything one phase produced. Immutable once the phase has drained.
#[derive(Debug, Clone)]
pub struct RunResult {
    latencies: Vec<Duration>,
    failures: Vec<RequestFailure>,
    elapsed: Duration,
}

impl RunResult {
    pub(crate) fn new(
        latencies: Vec<Duration>,
        failures: Vec<RequestFailure>,
        elapsed: Duration,
    ) -> Self {
        Self {
            latencies,
            failures,
            elapsed,
        }
    }

    pub fn total_requests(&self) -> u64 {
        self.successful_requests() + self.failed_requests()
    }

    pub fn successful_requests(&self) -> u64 {
        self.latencies.len() as u64
    }

    pub fn failed_requests(&self) -> u64 {
        self.failures.len() as u64
    }

    /// Wall-clock time between phase start and the last worker finishing.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Latencies of the successful requests, in recording order.
    pub fn latencies(&self) -> &[Duration] {
        &self.latencies
    }

    pub fn failures(&self) -> &[RequestFailure] {
        &self.failures
    }

    pub fn stats(&self) -> RunStatistics {
        RunStatistics::from_result(self)
    }
}
