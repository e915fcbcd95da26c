mod utils;
#[allow(unused)]
use utils::*;

use pelt::prelude::*;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn cold_probe_then_warm_run() {
    let addr = spawn_mock().await;

    let config = BenchmarkConfig::new(format!("http://{addr}/lazy"))
        .concurrency(4)
        .duration(Duration::from_millis(500))
        .warmup(Duration::from_millis(200))
        .timeout(Duration::from_secs(5));

    let comparison = compare_cold_warm(&config).await.unwrap();

    // The probe pays the cold cost and records the status it got, even
    // though it is an error code.
    assert_eq!(comparison.cold.status, Some(500));
    assert!(comparison.cold.error.is_none());
    let cold_ms = comparison.cold.latency_ms.unwrap();
    assert!(cold_ms >= 100.0, "cold probe was unexpectedly fast: {cold_ms}ms");

    let warm_stats = comparison.warm.stats();
    assert!(warm_stats.successful_requests > 0);

    // Steady state is far below the cold hit.
    let speedup = comparison.speedup().unwrap();
    assert!(speedup > 1.0, "no speedup measured: {speedup}");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_cold_target_still_yields_warm_numbers() {
    init_tracing();

    // Nothing listens on the discard port; every request fails fast.
    let config = BenchmarkConfig::new("http://127.0.0.1:9/health")
        .concurrency(2)
        .duration(Duration::from_millis(200))
        .warmup(Duration::ZERO)
        .timeout(Duration::from_secs(2));

    let comparison = compare_cold_warm(&config).await.unwrap();

    let error = comparison.cold.error.as_deref().unwrap();
    assert!(error.starts_with("connect_error:"), "unexpected tag: {error}");
    assert!(comparison.cold.latency_ms.is_none());
    assert!(comparison.cold.status.is_none());
    assert!(comparison.speedup().is_none());

    let warm_stats = comparison.warm.stats();
    assert!(warm_stats.failed_requests > 0);
    assert_eq!(warm_stats.successful_requests, 0);
    assert_eq!(warm_stats.success_rate, 0.0);
}
