//! Statistics derived from a completed phase.

use crate::data::RunResult;
use std::fmt;
use std::time::Duration;

/// Read-only summary of one [`RunResult`]. Latency figures are in
/// milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub duration: Duration,
    pub requests_per_second: f64,
    pub success_rate: f64,
    pub latency_min: f64,
    pub latency_avg: f64,
    pub latency_max: f64,
    pub latency_p50: f64,
    pub latency_p90: f64,
    pub latency_p99: f64,
}

impl RunStatistics {
    pub fn from_result(result: &RunResult) -> Self {
        let mut sorted: Vec<f64> = result
            .latencies()
            .iter()
            .map(|latency| latency.as_secs_f64() * 1_000.0)
            .collect();
        sorted.sort_by(f64::total_cmp);

        let successful = result.successful_requests();
        let total = result.total_requests();
        let secs = result.elapsed().as_secs_f64();

        let requests_per_second = if secs > 0.0 {
            successful as f64 / secs
        } else {
            0.0
        };
        let success_rate = if total > 0 {
            successful as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_requests: total,
            successful_requests: successful,
            failed_requests: result.failed_requests(),
            duration: result.elapsed(),
            requests_per_second,
            success_rate,
            latency_min: sorted.first().copied().unwrap_or(0.0),
            latency_avg: mean(&sorted),
            latency_max: sorted.last().copied().unwrap_or(0.0),
            latency_p50: percentile(&sorted, 0.50),
            latency_p90: percentile(&sorted, 0.90),
            latency_p99: percentile(&sorted, 0.99),
        }
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} req/s, {:.2}ms avg, {:.2}ms p99",
            self.requests_per_second, self.latency_avg, self.latency_p99
        )
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Nearest-rank percentile over an ascending-sorted slice: floor-scaled
/// index, clamped to the last element. Deliberately not interpolated; the
/// reported figures depend on these exact tie-breaks.
fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (sorted.len() as f64 * quantile) as usize;
    sorted[idx.min(sorted.len() - 1)]
}
