mod utils;
#[allow(unused)]
use utils::*;

use pelt::prelude::*;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn sustained_run_reports_consistent_counts() {
    let addr = spawn_mock().await;

    let config = BenchmarkConfig::new(format!("http://{addr}/delay/ms/1"))
        .concurrency(8)
        .duration(Duration::from_millis(800))
        .warmup(Duration::from_millis(200))
        .timeout(Duration::from_secs(5));

    let result = run_benchmark(&config).await.unwrap();
    let stats = result.stats();

    assert!(result.total_requests() > 0);
    assert_eq!(
        result.total_requests(),
        result.successful_requests() + result.failed_requests()
    );
    assert_eq!(result.failed_requests(), 0);
    assert!(stats.latency_min <= stats.latency_p50);
    assert!(stats.latency_p50 <= stats.latency_p90);
    assert!(stats.latency_p90 <= stats.latency_p99);
    // The straggler allowance is one request timeout, not unbounded.
    assert!(result.elapsed() >= Duration::from_millis(800));
    assert!(result.elapsed() < Duration::from_millis(800) + Duration::from_secs(5));
}

#[tokio::test(flavor = "multi_thread")]
async fn warmup_results_are_discarded() {
    let addr = spawn_mock().await;

    // The first request the service ever sees fails; the warmup phase
    // absorbs it, so the measured phase must be failure-free.
    let config = BenchmarkConfig::new(format!("http://{addr}/lazy"))
        .concurrency(4)
        .duration(Duration::from_millis(500))
        .warmup(Duration::from_millis(500))
        .timeout(Duration::from_secs(5));

    let result = run_benchmark(&config).await.unwrap();

    assert!(result.total_requests() > 0);
    assert_eq!(
        result.failed_requests(),
        0,
        "a warmup outcome leaked into the measurement phase"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn skipping_warmup_measures_immediately() {
    let addr = spawn_mock().await;

    let config = BenchmarkConfig::new(format!("http://{addr}/lazy"))
        .concurrency(2)
        .duration(Duration::from_millis(500))
        .warmup(Duration::ZERO)
        .timeout(Duration::from_secs(5));

    let result = run_benchmark(&config).await.unwrap();

    // Without a warmup phase the one cold failure lands in the measurement.
    assert_eq!(result.failed_requests(), 1);
    assert!(result.successful_requests() > 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_statuses_are_tagged() {
    let addr = spawn_mock().await;

    let config = BenchmarkConfig::new(format!("http://{addr}/status/503"))
        .concurrency(2)
        .duration(Duration::from_millis(300))
        .warmup(Duration::ZERO)
        .timeout(Duration::from_secs(5));

    let result = run_benchmark(&config).await.unwrap();
    let stats = result.stats();

    assert!(result.failed_requests() > 0);
    assert_eq!(result.successful_requests(), 0);
    assert_eq!(stats.requests_per_second, 0.0);
    assert_eq!(stats.success_rate, 0.0);
    assert!(result
        .failures()
        .iter()
        .all(|failure| failure.to_string() == "http_503"));
}
