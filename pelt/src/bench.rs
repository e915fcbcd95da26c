//! Benchmark orchestration: warmup/measurement sequencing and the
//! cold-start vs. warm-cache comparison protocol.

use crate::config::BenchmarkConfig;
use crate::data::RunResult;
use crate::error::{Error, RequestFailure};
use crate::request::{build_client, RequestTemplate};
use crate::runner::run_phase;
use crate::sink::ResultSink;
use std::time::Duration;
#[allow(unused)]
use tracing::{debug, error, info, instrument, trace, warn};

/// Settle time between the cold probe and the warm benchmark.
const COLD_SETTLE: Duration = Duration::from_secs(1);

/// Run the sustained benchmark: an optional capped-concurrency warmup
/// whose results are discarded, then the full-concurrency measurement
/// phase.
#[instrument(name = "benchmark", skip_all, fields(target = %config.target))]
pub async fn run_benchmark(config: &BenchmarkConfig) -> Result<RunResult, Error> {
    config.validate()?;
    let client = build_client(config)?;
    let template = RequestTemplate::new(client, config);
    let sink = ResultSink::new();

    let issuer = move || {
        let template = template.clone();
        async move { template.issue().await }
    };

    if !config.warmup.is_zero() {
        let warmup_workers = config.warmup_concurrency();
        info!(
            "Warming up for {:?} with {warmup_workers} workers",
            config.warmup
        );
        let warmup = run_phase(issuer.clone(), warmup_workers, config.warmup, &sink).await;
        debug!("Discarding {} warmup requests", warmup.total_requests());
        sink.clear();
    }

    info!(
        "Running benchmark for {:?} with {} workers",
        config.duration, config.concurrency
    );
    let result = run_phase(issuer, config.concurrency, config.duration, &sink).await;
    info!("Measurement complete: {}", result.stats());
    Ok(result)
}

/// Outcome of the single cold-start request.
///
/// Any received response counts as a hit, whatever its status; only
/// transport failures end up in `error`.
#[derive(Debug, Clone)]
pub struct ColdProbe {
    pub latency_ms: Option<f64>,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl ColdProbe {
    fn hit(latency: Duration, status: u16) -> Self {
        Self {
            latency_ms: Some(latency.as_secs_f64() * 1_000.0),
            status: Some(status),
            error: None,
        }
    }

    fn miss(failure: RequestFailure) -> Self {
        Self {
            latency_ms: None,
            status: None,
            error: Some(failure.to_string()),
        }
    }
}

/// Cold probe plus the warm sustained run that followed it.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub cold: ColdProbe,
    pub warm: RunResult,
}

impl Comparison {
    /// Cold latency over warm average latency. `None` when the probe got
    /// no response or the warm run has no positive average.
    pub fn speedup(&self) -> Option<f64> {
        let cold = self.cold.latency_ms?;
        let warm_avg = self.warm.stats().latency_avg;
        (warm_avg > 0.0).then(|| cold / warm_avg)
    }
}

/// Compare cold-start and warm-cache behavior: one unconcurrent probe,
/// a settle pause, then the full sustained sequence.
///
/// A probe failure is recorded, never raised; the warm numbers are always
/// produced even when the target was unreachable at the start.
#[instrument(name = "comparison", skip_all, fields(target = %config.target))]
pub async fn compare_cold_warm(config: &BenchmarkConfig) -> Result<Comparison, Error> {
    config.validate()?;

    info!("Issuing cold-start probe");
    let client = build_client(config)?;
    let template = RequestTemplate::new(client, config);
    let cold = match template.probe().await {
        Ok((latency, status)) => {
            info!(
                "Cold start: {:.3}ms (HTTP {status})",
                latency.as_secs_f64() * 1_000.0
            );
            ColdProbe::hit(latency, status)
        }
        Err(failure) => {
            warn!("Cold start probe failed: {failure}");
            ColdProbe::miss(failure)
        }
    };

    tokio::time::sleep(COLD_SETTLE).await;

    let warm = run_benchmark(config).await?;
    Ok(Comparison { cold, warm })
}
