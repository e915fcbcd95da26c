use std::net::SocketAddr;
use std::sync::Once;

/// Boot a fresh mock service on an ephemeral port, so parallel tests never
/// share server state.
#[allow(unused)]
pub async fn spawn_mock() -> SocketAddr {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_service::serve(listener).await });
    tracing::debug!("mock service listening on {addr}");
    addr
}

#[allow(unused)]
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("pelt=debug,mock_service=debug")
            .try_init();
    });
}
