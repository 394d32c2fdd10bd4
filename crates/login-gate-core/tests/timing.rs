// crates/login-gate-core/tests/timing.rs
// ============================================================================
// Module: Lookup Timing Tests
// Description: Exactly-once latency reporting across lookup outcomes.
// ============================================================================

//! ## Overview
//! Each gate evaluation that reaches the membership source must report one
//! timing observation, whatever the source returned.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::sync::Arc;

use common::ErroringSource;
use common::GWS_BASE;
use common::RecordingObserver;
use common::StaticSource;
use login_gate_core::LoginRequest;
use login_gate_core::MembershipSource;
use login_gate_core::SlackGate;

const RP: &str = "https://app.example.org/login";

fn observed_lookups(source: Arc<dyn MembershipSource>) -> usize {
    let observer = RecordingObserver::new();
    let gate = SlackGate::new(GWS_BASE, source).with_observer(observer.clone());
    let _ = gate.evaluate(&LoginRequest::new("bob", RP));
    observer.seen().len()
}

#[test]
fn matched_lookup_records_once() {
    assert_eq!(observed_lookups(StaticSource::body(r#"{"data":[{"id":"bob"}]}"#)), 1);
}

#[test]
fn empty_lookup_records_once() {
    assert_eq!(observed_lookups(StaticSource::body(r#"{"data":[]}"#)), 1);
}

#[test]
fn no_value_lookup_records_once() {
    assert_eq!(observed_lookups(StaticSource::none()), 1);
}

#[test]
fn erroring_lookup_records_once() {
    assert_eq!(observed_lookups(ErroringSource::new()), 1);
}

#[test]
fn skipped_lookup_records_nothing() {
    let observer = RecordingObserver::new();
    let gate = SlackGate::new(GWS_BASE, StaticSource::none()).with_observer(observer.clone());
    let _ = gate.evaluate(&LoginRequest::default());
    assert!(observer.seen().is_empty());
}

#[test]
fn observation_carries_lookup_identity() {
    let observer = RecordingObserver::new();
    let gate = SlackGate::new(GWS_BASE, StaticSource::none()).with_observer(observer.clone());
    let _ = gate.evaluate(&LoginRequest::new("bob", RP));
    let seen = observer.seen();
    assert_eq!(seen[0].username, "bob");
    assert_eq!(seen[0].group, "app.example.org");
    assert_eq!(seen[0].relying_party.as_deref(), Some(RP));
}
