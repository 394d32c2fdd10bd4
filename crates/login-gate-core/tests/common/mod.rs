// crates/login-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Gate Test Doubles
// Description: In-memory membership sources and lookup observers.
// Purpose: Drive gate policies without a Group Web Service.
// ============================================================================

//! Shared doubles for login gate integration tests.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Shared helpers are not used by every test binary."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use login_gate_core::LookupObserver;
use login_gate_core::LookupTiming;
use login_gate_core::MembershipSource;
use login_gate_core::MembershipSourceError;

/// Base URL used by every test gate.
pub const GWS_BASE: &str = "https://gws.example/group/";

/// Source that answers every request with the same body and records URLs.
pub struct StaticSource {
    /// Body returned for every request.
    body: Option<String>,
    /// Requested URLs, in order.
    urls: Mutex<Vec<String>>,
}

impl StaticSource {
    /// Source returning `body` for every request.
    pub fn body(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: Some(body.to_string()),
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Source returning no value for every request.
    pub fn none() -> Arc<Self> {
        Arc::new(Self {
            body: None,
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Returns the requested URLs.
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl MembershipSource for StaticSource {
    fn get(&self, url: &str) -> Result<Option<String>, MembershipSourceError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

/// Source failing every request.
pub struct ErroringSource {
    /// Number of calls made.
    calls: AtomicUsize,
}

impl ErroringSource {
    /// Creates a failing source.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    /// Returns the number of calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MembershipSource for ErroringSource {
    fn get(&self, _url: &str) -> Result<Option<String>, MembershipSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(MembershipSourceError::Request("connection reset".to_string()))
    }
}

/// Source whose client panics on every request.
pub struct PanickingSource;

impl MembershipSource for PanickingSource {
    fn get(&self, _url: &str) -> Result<Option<String>, MembershipSourceError> {
        panic!("group service client crashed");
    }
}

/// One observed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedLookup {
    /// Gate label.
    pub gate: String,
    /// Username checked.
    pub username: String,
    /// Relying-party id, when known.
    pub relying_party: Option<String>,
    /// Group queried.
    pub group: String,
}

/// Observer recording every lookup.
#[derive(Default)]
pub struct RecordingObserver {
    /// Observed lookups, in order.
    seen: Mutex<Vec<ObservedLookup>>,
}

impl RecordingObserver {
    /// Creates an empty observer.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the observed lookups.
    pub fn seen(&self) -> Vec<ObservedLookup> {
        self.seen.lock().unwrap().clone()
    }
}

impl LookupObserver for RecordingObserver {
    fn record_lookup(&self, timing: &LookupTiming<'_>) {
        self.seen.lock().unwrap().push(ObservedLookup {
            gate: timing.gate.as_str().to_string(),
            username: timing.username.to_string(),
            relying_party: timing.relying_party.map(str::to_string),
            group: timing.group.to_string(),
        });
    }
}
