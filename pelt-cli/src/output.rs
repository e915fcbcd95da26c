//! Rendering of run results: a console table or the JSON record.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use pelt::prelude::*;
use std::collections::HashMap;

/// Picked once at startup; never re-checked per print call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn print_banner(config: &BenchmarkConfig) {
    println!("pelt HTTP benchmark");
    println!("  Target:      {}", config.target);
    println!("  Method:      {}", config.method);
    println!("  Concurrency: {}", config.concurrency);
    println!("  Duration:    {}s", config.duration.as_secs());
    println!("  Warmup:      {}s", config.warmup.as_secs());
    println!();
}

pub fn print_run(result: &RunResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = BenchReport::from_result(result);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_table(result, "Benchmark Results");
            println!();
            println!("Summary: {}", result.stats());
        }
    }
    Ok(())
}

pub fn print_comparison(comparison: &Comparison, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = ComparisonReport::from_comparison(comparison);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            if let Some(latency) = comparison.cold.latency_ms {
                let status = comparison.cold.status.unwrap_or(0);
                println!("Cold start: {latency:.3}ms (HTTP {status})");
            } else if let Some(error) = &comparison.cold.error {
                println!("Cold start error: {error}");
            }
            println!();
            print_table(&comparison.warm, "Warm Cache Results");
            println!();
            if let Some(speedup) = comparison.speedup() {
                println!("Cache speedup: {speedup:.1}x faster");
            }
            println!("Summary: {}", comparison.warm.stats());
        }
    }
    Ok(())
}

fn print_table(result: &RunResult, title: &str) {
    let stats = result.stats();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![title.to_string()]);

    table.add_row(vec![
        "Total Requests".to_string(),
        stats.total_requests.to_string(),
    ]);
    table.add_row(vec![
        "Successful".to_string(),
        stats.successful_requests.to_string(),
    ]);
    table.add_row(vec![
        "Failed".to_string(),
        stats.failed_requests.to_string(),
    ]);
    table.add_row(vec![
        "Duration".to_string(),
        format!("{:.2}s", stats.duration.as_secs_f64()),
    ]);
    table.add_row(vec![
        "Requests/sec".to_string(),
        format!("{:.2}", stats.requests_per_second),
    ]);
    table.add_row(vec![
        "Success Rate".to_string(),
        format!("{:.2}%", stats.success_rate),
    ]);
    table.add_row(vec![
        "Latency (min)".to_string(),
        format!("{:.3}ms", stats.latency_min),
    ]);
    table.add_row(vec![
        "Latency (avg)".to_string(),
        format!("{:.3}ms", stats.latency_avg),
    ]);
    table.add_row(vec![
        "Latency (max)".to_string(),
        format!("{:.3}ms", stats.latency_max),
    ]);
    table.add_row(vec![
        "Latency (p50)".to_string(),
        format!("{:.3}ms", stats.latency_p50),
    ]);
    table.add_row(vec![
        "Latency (p90)".to_string(),
        format!("{:.3}ms", stats.latency_p90),
    ]);
    table.add_row(vec![
        "Latency (p99)".to_string(),
        format!("{:.3}ms", stats.latency_p99),
    ]);

    println!("{table}");

    let failures = result.failures();
    if !failures.is_empty() {
        println!();
        println!("Errors:");
        for (tag, count) in top_errors(failures, 5) {
            println!("  {tag}: {count}");
        }
    }
}

/// Aggregate failure tags by frequency, most common first.
fn top_errors(failures: &[RequestFailure], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for failure in failures {
        *counts.entry(failure.to_string()).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(limit);
    counts
}
