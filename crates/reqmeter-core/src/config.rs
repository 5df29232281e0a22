//! Request metrics configuration.
//!
//! Empty label name and prefix fall back to `"service"` and `"http"`. Nothing
//! else is validated except histogram buckets; an empty service name is a valid
//! (empty) label value.

use serde::Deserialize;

use crate::error::{ReqMeterError, Result};

pub const DEFAULT_SERVICE_LABEL: &str = "service";
pub const DEFAULT_METRIC_PREFIX: &str = "http";

/// Prometheus client default buckets, in seconds.
pub const DEFAULT_DURATION_BUCKETS: [f64; 11] =
    [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    #[serde(default)]
    pub service_name: String,

    #[serde(default)]
    pub service_label: String,

    #[serde(default)]
    pub metric_prefix: String,

    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            service_label: String::new(),
            metric_prefix: String::new(),
            duration_buckets: default_duration_buckets(),
        }
    }
}

impl MetricsConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Self::default()
        }
    }

    pub fn with_service_label(mut self, label: impl Into<String>) -> Self {
        self.service_label = label.into();
        self
    }

    pub fn with_metric_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metric_prefix = prefix.into();
        self
    }

    pub fn with_duration_buckets(mut self, buckets: Vec<f64>) -> Self {
        self.duration_buckets = buckets;
        self
    }

    /// Apply defaults for empty label name / prefix. Applying it twice is a no-op.
    pub fn normalized(mut self) -> Self {
        if self.service_label.is_empty() {
            self.service_label = DEFAULT_SERVICE_LABEL.to_string();
        }
        if self.metric_prefix.is_empty() {
            self.metric_prefix = DEFAULT_METRIC_PREFIX.to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_buckets(&self.duration_buckets)
    }

    pub fn requests_total_name(&self) -> String {
        format!("{}_requests_total", self.metric_prefix)
    }

    pub fn request_duration_name(&self) -> String {
        format!("{}_request_duration_seconds", self.metric_prefix)
    }

    /// Label schema shared by both instruments: `[<service_label>, code, method, path]`.
    pub fn label_names(&self) -> [&str; 4] {
        [self.service_label.as_str(), "code", "method", "path"]
    }
}

pub(crate) fn validate_buckets(buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(ReqMeterError::InvalidBuckets("bucket list must not be empty".into()));
    }
    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(ReqMeterError::InvalidBuckets("bucket bounds must be finite".into()));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ReqMeterError::InvalidBuckets(
            "bucket bounds must be strictly increasing".into(),
        ));
    }
    Ok(())
}

fn default_duration_buckets() -> Vec<f64> {
    DEFAULT_DURATION_BUCKETS.to_vec()
}
