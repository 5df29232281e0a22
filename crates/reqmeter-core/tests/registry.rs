#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use reqmeter_core::metrics::Registry;

#[test]
fn duplicate_name_is_rejected_across_kinds() {
    let registry = Registry::new();
    registry
        .register_counter_vec("jobs_total", "Jobs", &["queue"])
        .unwrap();

    let err = registry
        .register_counter_vec("jobs_total", "Jobs again", &["queue"])
        .err()
        .expect("duplicate counter must fail");
    assert_eq!(err.code().as_str(), "DUPLICATE_METRIC");

    let err = registry
        .register_histogram_vec("jobs_total", "Jobs", &["queue"], &[1.0])
        .err()
        .expect("duplicate histogram must fail");
    assert_eq!(err.code().as_str(), "DUPLICATE_METRIC");
}

#[test]
fn invalid_names_are_rejected() {
    let registry = Registry::new();
    let bad_metric = registry.register_counter_vec("my-app_total", "x", &["a"]);
    assert_eq!(bad_metric.err().unwrap().code().as_str(), "INVALID_NAME");

    let reserved = registry.register_counter_vec("ok_total", "x", &["__name"]);
    assert!(reserved.is_err());

    let repeated = registry.register_counter_vec("ok_total", "x", &["a", "a"]);
    assert!(repeated.is_err());

    let le = registry.register_histogram_vec("ok_seconds", "x", &["le"], &[1.0]);
    assert!(le.is_err());

    // Failed registrations do not reserve the name.
    assert!(!registry.contains("ok_total"));
    registry.register_counter_vec("ok_total", "x", &["a"]).unwrap();
}

#[test]
fn counter_series_are_keyed_by_ordered_values() {
    let registry = Registry::new();
    let c = registry
        .register_counter_vec("hits_total", "Hits", &["a", "b"])
        .unwrap();

    c.inc(&["x", "y"]);
    c.inc(&["x", "y"]);
    c.inc(&["y", "x"]);
    c.add(&["x", "y"], 3);

    assert_eq!(c.get(&["x", "y"]), Some(5));
    assert_eq!(c.get(&["y", "x"]), Some(1));
    assert_eq!(c.get(&["z", "z"]), None);
    assert_eq!(c.series_count(), 2);
}

#[test]
fn label_arity_mismatch_is_dropped() {
    let registry = Registry::new();
    let c = registry
        .register_counter_vec("hits_total", "Hits", &["a", "b"])
        .unwrap();
    let h = registry
        .register_histogram_vec("lat_seconds", "Latency", &["a"], &[1.0])
        .unwrap();

    c.inc(&["only-one"]);
    h.observe(&["one", "two"], 0.5);

    assert_eq!(c.series_count(), 0);
    assert_eq!(h.series_count(), 0);
}

#[test]
fn histogram_buckets_are_cumulative() {
    let registry = Registry::new();
    let h = registry
        .register_histogram_vec("lat_seconds", "Latency", &["op"], &[0.1, 0.5, 1.0])
        .unwrap();

    h.observe(&["read"], 0.05);
    h.observe(&["read"], 0.3);
    h.observe(&["read"], 2.0);

    let s = h.sample(&["read"]).unwrap();
    assert_eq!(s.count, 3);
    assert!((s.sum - 2.35).abs() < 1e-9);
    assert_eq!(s.buckets, vec![(0.1, 1), (0.5, 2), (1.0, 2)]);
    assert!(h.sample(&["write"]).is_none());
}

#[test]
fn concurrent_updates_are_not_lost() {
    let registry = Registry::new();
    let c = registry
        .register_counter_vec("hits_total", "Hits", &["a"])
        .unwrap();
    let h = registry
        .register_histogram_vec("lat_seconds", "Latency", &["a"], &[1.0])
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let c = Arc::clone(&c);
            let h = Arc::clone(&h);
            thread::spawn(move || {
                for _ in 0..1000 {
                    c.inc(&["x"]);
                    h.observe(&["x"], 0.25);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(c.get(&["x"]), Some(8000));
    let s = h.sample(&["x"]).unwrap();
    assert_eq!(s.count, 8000);
    assert!((s.sum - 2000.0).abs() < 1e-6);
}

#[test]
fn render_exposition_format() {
    let registry = Registry::new();
    let c = registry
        .register_counter_vec("b_total", "Total \"things\"", &["path"])
        .unwrap();
    let h = registry
        .register_histogram_vec("a_seconds", "Latency", &["path"], &[0.5, 1.0])
        .unwrap();

    c.inc(&["/q\"x"]);
    h.observe(&["/"], 0.25);

    let text = registry.render();
    let expected = "\
# HELP a_seconds Latency
# TYPE a_seconds histogram
a_seconds_bucket{path=\"/\",le=\"0.5\"} 1
a_seconds_bucket{path=\"/\",le=\"1\"} 1
a_seconds_bucket{path=\"/\",le=\"+Inf\"} 1
a_seconds_sum{path=\"/\"} 0.25
a_seconds_count{path=\"/\"} 1
# HELP b_total Total \"things\"
# TYPE b_total counter
b_total{path=\"/q\\\"x\"} 1
";
    assert_eq!(text, expected);
}

#[test]
fn lookup_by_name_and_kind() {
    let registry = Registry::new();
    let c = registry.register_counter_vec("hits_total", "Hits", &["a"]).unwrap();
    registry
        .register_histogram_vec("lat_seconds", "Latency", &["a"], &[1.0])
        .unwrap();

    c.inc(&["x"]);
    let found = registry.counter("hits_total").unwrap();
    assert_eq!(found.get(&["x"]), Some(1));
    assert_eq!(found.label_names(), ["a".to_string()]);

    assert!(registry.counter("lat_seconds").is_none());
    assert!(registry.histogram("lat_seconds").is_some());
    assert!(registry.histogram("missing").is_none());
}
