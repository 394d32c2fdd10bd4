// crates/login-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config loading tests.
// Purpose: Reduce duplication across integration tests for login-gate-config.
// =============================================================================

#![allow(
    dead_code,
    clippy::unwrap_used,
    reason = "Test helpers are selectively used across suites."
)]

use std::io::Write;
use std::sync::Arc;

use login_gate_core::MembershipSource;
use login_gate_core::MembershipSourceError;
use tempfile::NamedTempFile;

/// Minimal valid configuration text.
pub const MINIMAL: &str = "[gws]\nurl_base = \"https://gws.example/group/\"\n";

/// Writes `contents` to a temporary `.toml` file.
pub fn write_config(contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

/// Source answering every request with a fixed body.
pub struct FixedSource(pub Option<&'static str>);

impl FixedSource {
    /// Shared source answering with `body`.
    pub fn shared(body: Option<&'static str>) -> Arc<dyn MembershipSource> {
        Arc::new(Self(body))
    }
}

impl MembershipSource for FixedSource {
    fn get(&self, _url: &str) -> Result<Option<String>, MembershipSourceError> {
        Ok(self.0.map(str::to_string))
    }
}
