//! Mock HTTP service used to exercise the benchmark harness.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Extra cost paid by the very first `/lazy` request.
const COLD_DELAY: Duration = Duration::from_millis(200);
const WARM_DELAY: Duration = Duration::from_millis(1);

#[derive(Clone, Default)]
struct LazyState {
    warmed: Arc<AtomicBool>,
}

/// State is created per router, so parallel test servers never share it.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/delay/ms/:delay_ms", get(delay))
        .route("/status/:code", get(status))
        .route("/lazy", get(lazy))
        .with_state(LazyState::default())
}

pub async fn run(addr: SocketAddr) {
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    serve(listener).await;
}

pub async fn serve(listener: tokio::net::TcpListener) {
    axum::serve(listener, router()).await.unwrap();
}

async fn health() -> &'static str {
    "ok"
}

#[axum::debug_handler]
async fn delay(Path(delay_ms): Path<u64>) {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}

#[axum::debug_handler]
async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Cold on the first request (slow, 500), warm afterwards (fast, 200).
async fn lazy(State(state): State<LazyState>) -> StatusCode {
    if state.warmed.swap(true, Ordering::Relaxed) {
        tokio::time::sleep(WARM_DELAY).await;
        StatusCode::OK
    } else {
        debug!("Serving the cold request");
        tokio::time::sleep(COLD_DELAY).await;
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
