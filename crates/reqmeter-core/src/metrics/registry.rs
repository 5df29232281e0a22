//! Instrument registry.
//!
//! Owned by the caller and injected into every wrapper that needs it; there is
//! no process-wide default. Names are unique across counters and histograms.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::validate_buckets;
use crate::error::{ReqMeterError, Result};

use super::vec::{CounterVec, HistogramVec};
use super::{is_valid_label_name, is_valid_metric_name};

#[derive(Clone)]
enum Family {
    Counter(Arc<CounterVec>),
    Histogram(Arc<HistogramVec>),
}

#[derive(Default)]
pub struct Registry {
    families: DashMap<String, Family>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter family. Fails if `name` is already taken.
    pub fn register_counter_vec(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Arc<CounterVec>> {
        let labels = check_schema(name, label_names, false)?;
        match self.families.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ReqMeterError::DuplicateMetric(name.to_string())),
            Entry::Vacant(slot) => {
                let vec = Arc::new(CounterVec::new(name.to_string(), help.to_string(), labels));
                slot.insert(Family::Counter(Arc::clone(&vec)));
                tracing::debug!(metric = %name, "counter registered");
                Ok(vec)
            }
        }
    }

    /// Register a histogram family with the given upper bucket bounds.
    pub fn register_histogram_vec(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
        buckets: &[f64],
    ) -> Result<Arc<HistogramVec>> {
        let labels = check_schema(name, label_names, true)?;
        validate_buckets(buckets)?;
        match self.families.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ReqMeterError::DuplicateMetric(name.to_string())),
            Entry::Vacant(slot) => {
                let vec = Arc::new(HistogramVec::new(
                    name.to_string(),
                    help.to_string(),
                    labels,
                    buckets.to_vec(),
                ));
                slot.insert(Family::Histogram(Arc::clone(&vec)));
                tracing::debug!(metric = %name, "histogram registered");
                Ok(vec)
            }
        }
    }

    /// Drop a family by name. Returns whether it was registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.families.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.families.contains_key(name)
    }

    pub fn counter(&self, name: &str) -> Option<Arc<CounterVec>> {
        match self.families.get(name).as_deref() {
            Some(Family::Counter(c)) => Some(Arc::clone(c)),
            _ => None,
        }
    }

    pub fn histogram(&self, name: &str) -> Option<Arc<HistogramVec>> {
        match self.families.get(name).as_deref() {
            Some(Family::Histogram(h)) => Some(Arc::clone(h)),
            _ => None,
        }
    }

    /// Render all registered families, sorted by name, in Prometheus text format.
    pub fn render(&self) -> String {
        let mut families: Vec<(String, Family)> = self
            .families
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        families.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        for (_, family) in families {
            match family {
                Family::Counter(c) => c.render(&mut out),
                Family::Histogram(h) => h.render(&mut out),
            }
        }
        out
    }
}

fn check_schema(name: &str, label_names: &[&str], histogram: bool) -> Result<Vec<String>> {
    if !is_valid_metric_name(name) {
        return Err(ReqMeterError::InvalidName(format!("metric name {name:?}")));
    }
    let mut seen = HashSet::new();
    for label in label_names {
        if !is_valid_label_name(label) || (histogram && *label == "le") {
            return Err(ReqMeterError::InvalidName(format!(
                "label name {label:?} on metric {name}"
            )));
        }
        if !seen.insert(*label) {
            return Err(ReqMeterError::InvalidName(format!(
                "label name {label:?} repeated on metric {name}"
            )));
        }
    }
    Ok(label_names.iter().map(|l| l.to_string()).collect())
}
