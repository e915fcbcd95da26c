use anyhow::Context;
use clap::Parser;
use pelt::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod output;

use output::OutputFormat;

/// HTTP load benchmark: closed-loop concurrent workers, latency
/// percentiles, and cold-start vs. warm-cache comparison.
#[derive(Parser, Debug)]
#[command(name = "pelt", version, about)]
struct Args {
    /// Target URL to benchmark
    #[arg(short, long, default_value = pelt::config::DEFAULT_TARGET)]
    url: String,

    /// Benchmark duration in seconds
    #[arg(short, long, default_value_t = 10)]
    duration: u64,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = 50)]
    concurrency: usize,

    /// HTTP method (GET, POST, PUT or DELETE)
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Request body for POST/PUT
    #[arg(short, long)]
    body: Option<String>,

    /// Warmup duration in seconds
    #[arg(short, long, default_value_t = 2)]
    warmup: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30.0)]
    timeout: f64,

    /// Compare cold start vs warm cache performance
    #[arg(long)]
    compare_cold_warm: bool,

    /// Emit results as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<BenchmarkConfig> {
        anyhow::ensure!(
            self.timeout.is_finite() && self.timeout > 0.0,
            "timeout must be a positive number of seconds"
        );
        let method: Method = self.method.parse()?;

        let mut config = BenchmarkConfig::new(&self.url)
            .method(method)
            .duration(Duration::from_secs(self.duration))
            .concurrency(self.concurrency)
            .warmup(Duration::from_secs(self.warmup))
            .timeout(Duration::from_secs_f64(self.timeout));
        if let Some(body) = &self.body {
            config = config.body(body.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = args.config().context("invalid configuration")?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    if format == OutputFormat::Table {
        output::print_banner(&config);
    }

    if args.compare_cold_warm {
        let comparison = compare_cold_warm(&config).await?;
        output::print_comparison(&comparison, format)?;
    } else {
        let result = run_benchmark(&config).await?;
        output::print_run(&result, format)?;
    }

    Ok(())
}

// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pelt=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
