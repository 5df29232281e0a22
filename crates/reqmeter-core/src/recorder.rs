//! Request metrics recorder.
//!
//! Owns the two instruments behind the request wrapper and writes exactly one
//! counter increment plus one histogram observation per completed request,
//! both with the same label tuple `(service, code, method, path)`.

use std::sync::Arc;
use std::time::Duration;

use crate::config::MetricsConfig;
use crate::error::Result;
use crate::metrics::{LabeledCounter, LabeledObserver, Registry};

const REQUESTS_HELP: &str = "Total HTTP requests received";
const DURATION_HELP: &str = "Duration of HTTP requests performed";

/// Label values resolved for one finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLabels {
    pub code: String,
    pub method: String,
    pub path: String,
}

#[derive(Clone)]
pub struct RequestMetrics {
    service_name: String,
    requests: Arc<dyn LabeledCounter>,
    latency: Arc<dyn LabeledObserver>,
}

impl RequestMetrics {
    /// Apply config defaults and register both instruments in `registry`.
    ///
    /// A name clash with an already registered instrument is returned as
    /// `ReqMeterError::DuplicateMetric`. On any failure the registry is left
    /// as it was.
    pub fn register(cfg: MetricsConfig, registry: &Registry) -> Result<Self> {
        let cfg = cfg.normalized();
        cfg.validate()?;

        let labels = cfg.label_names();
        let counter_name = cfg.requests_total_name();
        let requests = registry.register_counter_vec(&counter_name, REQUESTS_HELP, &labels)?;
        let latency = match registry.register_histogram_vec(
            &cfg.request_duration_name(),
            DURATION_HELP,
            &labels,
            &cfg.duration_buckets,
        ) {
            Ok(latency) => latency,
            Err(e) => {
                // Construct is all-or-nothing.
                registry.unregister(&counter_name);
                return Err(e);
            }
        };

        tracing::info!(
            service = %cfg.service_name,
            service_label = %cfg.service_label,
            prefix = %cfg.metric_prefix,
            "request metrics registered"
        );

        Ok(Self {
            service_name: cfg.service_name,
            requests,
            latency,
        })
    }

    /// Build from already existing instruments (custom backends, test doubles).
    pub fn from_instruments(
        service_name: impl Into<String>,
        requests: Arc<dyn LabeledCounter>,
        latency: Arc<dyn LabeledObserver>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            requests,
            latency,
        }
    }

    /// Record one finished request.
    pub fn record(&self, labels: &RequestLabels, elapsed: Duration) {
        let values = [
            self.service_name.as_str(),
            labels.code.as_str(),
            labels.method.as_str(),
            labels.path.as_str(),
        ];
        self.requests.increment(&values);
        self.latency.record(&values, elapsed.as_secs_f64());

        tracing::trace!(
            code = %labels.code,
            method = %labels.method,
            path = %labels.path,
            elapsed_s = elapsed.as_secs_f64(),
            "request recorded"
        );
    }
}
