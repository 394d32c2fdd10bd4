// crates/login-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for login gate configuration. The output always loads
//! and validates.

/// Returns a canonical example `login-gate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[gws]
url_base = "https://groups.example.edu/group_sws/v3/group/"
timeout_ms = 5000
max_response_bytes = 1048576
user_agent = "login-gate/0.1"
allow_http = false
# bearer_token = "..."

[slack]
enabled = true

[[warning]]
name = "google-notice"
target_rpid = "google.com/a/example.edu"
group_id = "u_example_notice"

[[warning]]
name = "vpn-all-users"
target_rpid = "https://vpn.example.edu/sso"
"#,
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
