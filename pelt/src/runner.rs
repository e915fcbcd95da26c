//! Phase execution: one worker pool, one deadline, one sink.

use crate::data::RunResult;
use crate::request::RequestOutcome;
use crate::sink::ResultSink;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Run one phase: `concurrency` closed-loop workers driving the issuer
/// until `duration` elapses, then a join-all drain.
///
/// The reported elapsed time spans from just before the workers spawn to
/// after the last one finishes, so stragglers that were in flight at the
/// deadline are covered by it. Drain time is bounded by the per-request
/// timeout carried inside the issuer.
pub(crate) async fn run_phase<T, F>(
    issuer: T,
    concurrency: usize,
    duration: Duration,
    sink: &ResultSink,
) -> RunResult
where
    T: Fn() -> F + Send + Sync + 'static + Clone,
    F: Future<Output = RequestOutcome> + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let start = Instant::now();

    let mut workers = Vec::with_capacity(concurrency);
    for _ in 0..concurrency {
        workers.push(tokio::spawn(worker_loop(
            issuer.clone(),
            sink.clone(),
            stop.clone(),
        )));
    }
    debug!("Spawned {concurrency} workers");

    tokio::time::sleep(duration).await;
    stop.store(true, Ordering::Relaxed);
    trace!("Stop signalled, draining workers");

    for worker in workers {
        if let Err(err) = worker.await {
            error!("Worker task failed: {err}");
        }
    }
    let elapsed = start.elapsed();

    let (latencies, failures) = sink.snapshot();
    RunResult::new(latencies, failures, elapsed)
}

/// Issue-and-record until the stop flag is observed. The flag is checked
/// before each request, so one already in flight at the deadline completes
/// and its result is still recorded. A failed request never ends the loop.
async fn worker_loop<T, F>(issuer: T, sink: ResultSink, stop: Arc<AtomicBool>)
where
    T: Fn() -> F + Send + 'static,
    F: Future<Output = RequestOutcome> + Send + 'static,
{
    while !stop.load(Ordering::Relaxed) {
        sink.record(issuer().await);
    }
}
