//! Axum router wiring.
//!
//! `metrics_router` serves the registry's text exposition. `build_demo_router`
//! assembles the demo service: instrumented application routes plus the
//! uninstrumented metrics route.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use reqmeter_core::Registry;

use crate::middleware::HttpMetrics;

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub fn metrics_router(registry: Arc<Registry>, path: &str) -> Router {
    Router::new()
        .route(path, get(render_metrics))
        .with_state(registry)
}

async fn render_metrics(State(registry): State<Arc<Registry>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], registry.render())
}

pub fn build_demo_router(
    metrics: &HttpMetrics,
    registry: Arc<Registry>,
    metrics_path: &str,
) -> Router {
    let app = Router::new()
        .route("/", get(index))
        .route("/users/:id", get(get_user));

    metrics
        .wrap(app)
        .merge(metrics_router(registry, metrics_path))
}

async fn index() -> &'static str {
    "ok"
}

async fn get_user(Path(id): Path<String>) -> String {
    format!("user {id}")
}
