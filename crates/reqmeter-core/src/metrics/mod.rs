//! Labeled metric instruments and the registry that owns them.
//!
//! Instruments are keyed by a fixed, ordered list of label names chosen at
//! registration. Series are stored in `DashMap`s of atomics so concurrent
//! increments/observations never lose updates. The request wrapper only sees
//! the two capability traits below.

pub mod registry;
pub mod vec;

pub use registry::Registry;
pub use vec::{CounterVec, HistogramSample, HistogramVec};

/// Select a series by label values, then increment it by one.
pub trait LabeledCounter: Send + Sync {
    fn increment(&self, label_values: &[&str]);
}

/// Select a series by label values, then observe `value` into it.
pub trait LabeledObserver: Send + Sync {
    fn record(&self, label_values: &[&str], value: f64);
}

/// Helper to escape label values.
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Helper to escape HELP text.
pub(crate) fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

pub(crate) fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

pub(crate) fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
