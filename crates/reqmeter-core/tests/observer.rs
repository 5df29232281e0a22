#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use reqmeter_core::observer::{StatusObserver, UNSET_STATUS};

#[test]
fn unset_status_reports_zero() {
    let obs = StatusObserver::new();
    assert_eq!(obs.code(), UNSET_STATUS);
    assert_eq!(obs.code_label(), "0");
}

#[test]
fn observe_passes_value_through() {
    let mut obs = StatusObserver::new();
    let out = obs.observe((418u16, "teapot"), |v| v.0);
    assert_eq!(out, (418, "teapot"));
    assert_eq!(obs.code(), 418);
    assert_eq!(obs.code_label(), "418");
}

#[test]
fn last_write_wins() {
    let mut obs = StatusObserver::new();
    let first = obs.observe(200u16, |v| *v);
    let second = obs.observe(500u16, |v| *v);

    assert_eq!((first, second), (200, 500));
    assert_eq!(obs.code(), 500);
}
