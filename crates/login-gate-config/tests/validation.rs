// crates/login-gate-config/tests/validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Range, scheme, and uniqueness checks.
// Purpose: Pin every validation rule and the operator diagnostics.
// =============================================================================

//! Validation tests for login-gate-config.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use common::MINIMAL;
use login_gate_config::ConfigError;
use login_gate_config::LoginGateConfig;

type TestResult = Result<(), String>;

/// Assert that parsing fails validation with a message containing `needle`.
fn assert_invalid(text: &str, needle: &str) -> TestResult {
    match LoginGateConfig::parse(text) {
        Err(ConfigError::Invalid(message)) => {
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Err(other) => Err(format!("unexpected error kind: {other}")),
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Builds a `[gws]` section with the given extra lines.
fn gws(url_base: &str, extra: &str) -> String {
    format!("[gws]\nurl_base = \"{url_base}\"\n{extra}")
}

// ============================================================================
// SECTION: Group Web Service
// ============================================================================

#[test]
fn empty_url_base_rejected() -> TestResult {
    assert_invalid(&gws("", ""), "non-empty")
}

#[test]
fn relative_url_base_rejected() -> TestResult {
    assert_invalid(&gws("groups/", ""), "not a url")
}

#[test]
fn cleartext_url_base_requires_allow_http() -> TestResult {
    assert_invalid(&gws("http://gws.example/", ""), "allow_http")?;
    LoginGateConfig::parse(&gws("http://gws.example/", "allow_http = true\n"))
        .map(|_| ())
        .map_err(|err| err.to_string())
}

#[test]
fn non_http_scheme_rejected() -> TestResult {
    assert_invalid(&gws("ftp://gws.example/", ""), "http(s)")
}

#[test]
fn timeout_bounds_enforced() -> TestResult {
    assert_invalid(&gws("https://gws.example/", "timeout_ms = 99\n"), "timeout_ms")?;
    assert_invalid(&gws("https://gws.example/", "timeout_ms = 30001\n"), "timeout_ms")?;
    for edge in [100, 30_000] {
        LoginGateConfig::parse(&gws("https://gws.example/", &format!("timeout_ms = {edge}\n")))
            .map_err(|err| err.to_string())?;
    }
    Ok(())
}

#[test]
fn response_limit_bounds_enforced() -> TestResult {
    assert_invalid(&gws("https://gws.example/", "max_response_bytes = 0\n"), "max_response_bytes")?;
    assert_invalid(
        &gws("https://gws.example/", "max_response_bytes = 16777217\n"),
        "max_response_bytes",
    )
}

#[test]
fn blank_user_agent_rejected() -> TestResult {
    assert_invalid(&gws("https://gws.example/", "user_agent = \" \"\n"), "user_agent")
}

#[test]
fn blank_bearer_token_rejected() -> TestResult {
    assert_invalid(&gws("https://gws.example/", "bearer_token = \"\"\n"), "bearer_token")
}

// ============================================================================
// SECTION: Warning Entries
// ============================================================================

#[test]
fn empty_warning_name_rejected() -> TestResult {
    assert_invalid(&format!("{MINIMAL}\n[[warning]]\nname = \"\"\ngroup_id = \"g\"\n"), "name")
}

#[test]
fn duplicate_warning_names_rejected() -> TestResult {
    let first = "[[warning]]\nname = \"a\"\ngroup_id = \"g\"\n";
    let second = "[[warning]]\nname = \"a\"\ntarget_rpid = \"rp\"\n";
    let text = format!("{MINIMAL}\n{first}\n{second}");
    assert_invalid(&text, "duplicate warning name")
}

#[test]
fn unselective_warning_loads_with_diagnostic() {
    let config = LoginGateConfig::parse(&format!("{MINIMAL}\n[[warning]]\nname = \"noop\"\n"))
        .unwrap();
    let notes = config.diagnostics();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].starts_with("warning.noop:"));
}

#[test]
fn disabled_slack_reported() {
    let config = LoginGateConfig::parse(&format!("{MINIMAL}\n[slack]\nenabled = false\n")).unwrap();
    assert_eq!(config.diagnostics(), vec!["slack gate is disabled".to_string()]);
}
