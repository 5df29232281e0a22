//! reqmeter demo server.
//!
//! Serves a couple of instrumented routes and the Prometheus exposition
//! endpoint. Config is read from `reqmeter.yaml`.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use reqmeter_axum::{config, router, HttpMetrics};
use reqmeter_core::Registry;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("reqmeter.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let registry = Arc::new(Registry::new());
    let metrics = HttpMetrics::new(cfg.metrics, &registry).expect("metrics registration failed");
    let app = router::build_demo_router(
        &metrics,
        Arc::clone(&registry),
        &cfg.server.metrics_path,
    );

    tracing::info!(%listen, metrics_path = %cfg.server.metrics_path, "reqmeter-demo starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
