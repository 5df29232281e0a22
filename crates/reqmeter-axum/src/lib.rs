//! reqmeter axum adapter.
//!
//! Wires the recording core into axum: a `from_fn_with_state` middleware that
//! times every request, captures its final status and resolves the matched
//! route pattern, plus the `/metrics` exposition route and the demo server's
//! strict YAML config.

pub mod config;
pub mod middleware;
pub mod route;
pub mod router;

pub use middleware::{track_requests, HttpMetrics};
