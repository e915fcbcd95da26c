mod utils;
#[allow(unused)]
use utils::*;

use pelt::prelude::*;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn json_record_has_the_wire_shape() -> anyhow::Result<()> {
    let addr = spawn_mock().await;

    let config = BenchmarkConfig::new(format!("http://{addr}/delay/ms/1"))
        .concurrency(4)
        .duration(Duration::from_millis(400))
        .warmup(Duration::ZERO)
        .timeout(Duration::from_secs(5));

    let result = run_benchmark(&config).await?;
    let report = BenchReport::from_result(&result);
    let value = serde_json::to_value(&report)?;

    assert_eq!(
        value["total_requests"].as_u64().unwrap(),
        value["successful_requests"].as_u64().unwrap()
            + value["failed_requests"].as_u64().unwrap()
    );
    for key in ["min", "avg", "max", "p50", "p90", "p99"] {
        assert!(value["latency_ms"][key].is_number(), "missing latency_ms.{key}");
    }
    assert!(value["errors"].as_array().unwrap().len() <= 10);

    let secs = value["duration_seconds"].as_f64().unwrap();
    assert!(secs >= 0.4 && secs < 5.4, "implausible duration: {secs}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn comparison_record_nests_warm_cache() -> anyhow::Result<()> {
    let addr = spawn_mock().await;

    let config = BenchmarkConfig::new(format!("http://{addr}/health"))
        .concurrency(2)
        .duration(Duration::from_millis(300))
        .warmup(Duration::ZERO)
        .timeout(Duration::from_secs(5));

    let comparison = compare_cold_warm(&config).await?;
    let value = serde_json::to_value(ComparisonReport::from_comparison(&comparison))?;

    assert!(value["cold_start_ms"].is_number());
    assert_eq!(value["cold_start_status"].as_u64().unwrap(), 200);
    assert!(value.get("cold_start_error").is_none());
    assert!(value["warm_cache"]["total_requests"].is_number());
    assert!(value["warm_cache"]["latency_ms"]["p99"].is_number());
    Ok(())
}
