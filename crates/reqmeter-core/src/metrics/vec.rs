//! Counter and histogram families with a fixed label schema.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::{escape_help, escape_label, LabeledCounter, LabeledObserver};

/// Render `name="value"` pairs for one series.
fn label_pairs(names: &[String], values: &[String]) -> String {
    names
        .iter()
        .zip(values)
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn owned_key(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn arity_ok(name: &str, label_names: &[String], values: &[&str]) -> bool {
    if values.len() == label_names.len() {
        return true;
    }
    tracing::warn!(
        metric = %name,
        expected = label_names.len(),
        got = values.len(),
        "label value count mismatch, observation dropped"
    );
    false
}

pub struct CounterVec {
    name: String,
    help: String,
    label_names: Vec<String>,
    map: DashMap<Vec<String>, AtomicU64>,
}

impl CounterVec {
    pub(crate) fn new(name: String, help: String, label_names: Vec<String>) -> Self {
        Self {
            name,
            help,
            label_names,
            map: DashMap::new(),
        }
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) {
        self.add(values, 1);
    }

    /// Increment by an arbitrary value. Values must follow the registered label order.
    pub fn add(&self, values: &[&str], v: u64) {
        if !arity_ok(&self.name, &self.label_names, values) {
            return;
        }
        let counter = self
            .map
            .entry(owned_key(values))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series, if it was ever touched.
    pub fn get(&self, values: &[&str]) -> Option<u64> {
        self.map
            .get(&owned_key(values))
            .map(|c| c.load(Ordering::Relaxed))
    }

    /// Number of distinct label tuples seen so far.
    pub fn series_count(&self) -> usize {
        self.map.len()
    }

    /// Render in Prometheus text exposition format.
    pub(crate) fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} counter", self.name);

        let mut series: Vec<(Vec<String>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        series.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, val) in series {
            let label_str = label_pairs(&self.label_names, &key);
            if label_str.is_empty() {
                let _ = writeln!(out, "{} {}", self.name, val);
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", self.name, label_str, val);
            }
        }
    }
}

impl LabeledCounter for CounterVec {
    fn increment(&self, label_values: &[&str]) {
        self.inc(label_values);
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_bits: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(bucket_count: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_bits: AtomicU64::new(0f64.to_bits()),
            buckets: (0..bucket_count).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    fn add_sum(&self, v: f64) {
        let mut cur = self.sum_bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + v).to_bits();
            match self
                .sum_bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    fn sum(&self) -> f64 {
        f64::from_bits(self.sum_bits.load(Ordering::Relaxed))
    }
}

/// Snapshot of one histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSample {
    pub count: u64,
    pub sum: f64,
    /// Cumulative `(upper_bound, count)` pairs, excluding `+Inf`.
    pub buckets: Vec<(f64, u64)>,
}

pub struct HistogramVec {
    name: String,
    help: String,
    label_names: Vec<String>,
    bounds: Vec<f64>,
    map: DashMap<Vec<String>, AtomicHistogram>,
}

impl HistogramVec {
    pub(crate) fn new(
        name: String,
        help: String,
        label_names: Vec<String>,
        bounds: Vec<f64>,
    ) -> Self {
        Self {
            name,
            help,
            label_names,
            bounds,
            map: DashMap::new(),
        }
    }

    /// Observe a value and increment cumulative buckets.
    pub fn observe(&self, values: &[&str], v: f64) {
        if !arity_ok(&self.name, &self.label_names, values) {
            return;
        }
        let bucket_count = self.bounds.len();
        let hist = self
            .map
            .entry(owned_key(values))
            .or_insert_with(|| AtomicHistogram::new(bucket_count));

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.add_sum(v);

        // Cumulative: every bucket whose upper bound covers the value.
        for (i, &le) in self.bounds.iter().enumerate() {
            if v <= le {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn sample(&self, values: &[&str]) -> Option<HistogramSample> {
        self.map.get(&owned_key(values)).map(|hist| HistogramSample {
            count: hist.count.load(Ordering::Relaxed),
            sum: hist.sum(),
            buckets: self
                .bounds
                .iter()
                .zip(&hist.buckets)
                .map(|(&le, c)| (le, c.load(Ordering::Relaxed)))
                .collect(),
        })
    }

    /// Number of distinct label tuples seen so far.
    pub fn series_count(&self) -> usize {
        self.map.len()
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    pub(crate) fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} histogram", self.name);

        let mut keys: Vec<Vec<String>> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };
            let label_str = label_pairs(&self.label_names, &key);
            let prefix = if label_str.is_empty() {
                String::new()
            } else {
                format!("{},", label_str)
            };

            for (i, &le) in self.bounds.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(
                    out,
                    "{}_bucket{{{}le=\"{}\"}} {}",
                    self.name, prefix, le, count
                );
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", self.name, prefix, count);

            if label_str.is_empty() {
                let _ = writeln!(out, "{}_sum {}", self.name, hist.sum());
                let _ = writeln!(out, "{}_count {}", self.name, count);
            } else {
                let _ = writeln!(out, "{}_sum{{{}}} {}", self.name, label_str, hist.sum());
                let _ = writeln!(out, "{}_count{{{}}} {}", self.name, label_str, count);
            }
        }
    }
}

impl LabeledObserver for HistogramVec {
    fn record(&self, label_values: &[&str], value: f64) {
        self.observe(label_values, value);
    }
}
