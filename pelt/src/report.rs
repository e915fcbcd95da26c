//! Serializable result records with the wire-stable field layout.

use crate::bench::Comparison;
use crate::data::RunResult;
use serde::Serialize;

/// Reports carry at most this many error tags.
pub const MAX_REPORTED_ERRORS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub duration_seconds: f64,
    pub requests_per_second: f64,
    pub success_rate_percent: f64,
    pub latency_ms: LatencyReport,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyReport {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

impl BenchReport {
    pub fn from_result(result: &RunResult) -> Self {
        let stats = result.stats();
        Self {
            total_requests: stats.total_requests,
            successful_requests: stats.successful_requests,
            failed_requests: stats.failed_requests,
            duration_seconds: round3(stats.duration.as_secs_f64()),
            requests_per_second: round2(stats.requests_per_second),
            success_rate_percent: round2(stats.success_rate),
            latency_ms: LatencyReport {
                min: round3(stats.latency_min),
                avg: round3(stats.latency_avg),
                max: round3(stats.latency_max),
                p50: round3(stats.latency_p50),
                p90: round3(stats.latency_p90),
                p99: round3(stats.latency_p99),
            },
            errors: result
                .failures()
                .iter()
                .take(MAX_REPORTED_ERRORS)
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Comparison-mode record: cold-start fields next to the nested warm-cache
/// record. Absent cold fields are omitted, never `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_start_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_start_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_start_error: Option<String>,
    pub warm_cache: BenchReport,
}

impl ComparisonReport {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            cold_start_ms: comparison.cold.latency_ms.map(round3),
            cold_start_status: comparison.cold.status,
            cold_start_error: comparison.cold.error.clone(),
            warm_cache: BenchReport::from_result(&comparison.warm),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1_000.0).round() / 1_000.0
}
