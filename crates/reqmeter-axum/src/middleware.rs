//! Request instrumentation middleware.
//!
//! `HttpMetrics` is built once per service; `wrap` adapts a router (or a
//! single method router) so each request records one counter increment and one
//! duration observation after the inner handler has produced its response.
//! The response itself is passed through untouched.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
    Router,
};

use reqmeter_core::error::Result;
use reqmeter_core::{MetricsConfig, Registry, RequestLabels, RequestMetrics, StatusObserver};

use crate::route;

#[derive(Clone)]
pub struct HttpMetrics {
    recorder: Arc<RequestMetrics>,
}

impl HttpMetrics {
    /// Register the request counter and duration histogram in `registry`.
    ///
    /// Fails when either metric name is already registered there.
    pub fn new(cfg: MetricsConfig, registry: &Registry) -> Result<Self> {
        let recorder = RequestMetrics::register(cfg, registry)?;
        Ok(Self::from_recorder(recorder))
    }

    /// Wrap an existing recorder, e.g. one built over custom instruments.
    pub fn from_recorder(recorder: RequestMetrics) -> Self {
        Self {
            recorder: Arc::new(recorder),
        }
    }

    /// Instrument every route of `router`.
    pub fn wrap<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(self.clone(), track_requests))
    }

    /// Instrument a single handler.
    pub fn wrap_route<S>(&self, route: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        route.layer(middleware::from_fn_with_state(self.clone(), track_requests))
    }
}

pub async fn track_requests(
    State(metrics): State<HttpMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_owned();
    let path = route::path_label(&request);

    let mut observer = StatusObserver::new();
    let start = Instant::now();
    let response = observer.observe(next.run(request).await, |res| res.status().as_u16());
    let elapsed = start.elapsed();

    let labels = RequestLabels {
        code: observer.code_label(),
        method,
        path,
    };
    metrics.recorder.record(&labels, elapsed);

    response
}
