//! reqmeter core: transport-agnostic request metrics recording.
//!
//! This crate defines the metric registry, the narrow instrument capabilities the
//! request wrapper depends on, the response status observer, and the recording
//! contract shared by transport adapters. It carries no HTTP or runtime
//! dependencies so it can sit behind any server stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Fallible paths surface
//! as `ReqMeterError`/`Result`; per-request recording never fails.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod recorder;

/// Shared result type.
pub use error::{ReqMeterError, Result};

pub use config::MetricsConfig;
pub use metrics::{LabeledCounter, LabeledObserver, Registry};
pub use observer::StatusObserver;
pub use recorder::{RequestLabels, RequestMetrics};
