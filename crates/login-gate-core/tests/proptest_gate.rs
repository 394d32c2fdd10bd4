// crates/login-gate-core/tests/proptest_gate.rs
// ============================================================================
// Module: Normalizer and Matcher Property Tests
// Description: Totality, determinism, and charset properties.
// Purpose: Ensure arbitrary relying-party ids and bodies never panic.
// ============================================================================

//! Property-based tests for key normalization and member matching.

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

use login_gate_core::IndeterminateReason;
use login_gate_core::MembershipQueryResult;
use login_gate_core::match_members;
use login_gate_core::normalize;
use proptest::prelude::*;

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '.' || ch == '-'
}

proptest! {
    #[test]
    fn normalize_is_total_and_deterministic(raw in ".*") {
        let first = normalize(&raw);
        let second = normalize(&raw);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalized_keys_use_key_charset(raw in ".*") {
        let key = normalize(&raw);
        prop_assert!(key.as_str().chars().all(is_key_char), "key {}", key);
    }

    #[test]
    fn normalized_keys_have_no_separator(raw in "(https?://|oidc/)?[a-zA-Z0-9./:_]{0,40}") {
        prop_assert!(!normalize(&raw).as_str().contains('/'));
    }

    #[test]
    fn unprefixed_ids_are_lower_cased(raw in "[A-Za-z0-9.]{1,24}") {
        prop_assert_eq!(normalize(&raw).into_string(), raw.to_ascii_lowercase());
    }

    #[test]
    fn matcher_never_panics(body in ".*", username in "[a-z]{0,8}") {
        let _ = match_members(Some(&body), &username);
    }

    #[test]
    fn matcher_finds_listed_member(
        ids in prop::collection::vec("[a-z]{1,8}", 0 .. 8),
        username in "[a-z]{1,8}",
    ) {
        let data: Vec<serde_json::Value> =
            ids.iter().map(|id| serde_json::json!({ "id": id })).collect();
        let body = serde_json::json!({ "data": data }).to_string();
        let matched = match_members(Some(&body), &username);
        if ids.contains(&username) {
            prop_assert_eq!(matched.result, MembershipQueryResult::Matched);
        } else {
            prop_assert_eq!(matched.result, MembershipQueryResult::NotMatched);
            prop_assert_eq!(matched.seen_ids, ids);
        }
    }
}

#[test]
fn matcher_short_circuits_before_malformed_member() {
    let matched = match_members(Some(r#"{"data":[{"id":"bob"},{"oops":1}]}"#), "bob");
    assert_eq!(matched.result, MembershipQueryResult::Matched);
    let missed = match_members(Some(r#"{"data":[{"id":"amy"},{"oops":1}]}"#), "bob");
    assert_eq!(
        missed.result,
        MembershipQueryResult::Indeterminate(IndeterminateReason::TransportError)
    );
}
