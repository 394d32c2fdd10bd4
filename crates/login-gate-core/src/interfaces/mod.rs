// crates/login-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Login Gate Interfaces
// Description: Collaborator contracts for membership transport and timing.
// Purpose: Define the seams gates use to reach external systems.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Gates never perform I/O directly. The Group Web Service is reached through
//! [`MembershipSource`], and lookup latency is reported to a
//! [`LookupObserver`]. Implementations are shared across concurrent
//! evaluations and must be `Send + Sync`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use thiserror::Error;

use crate::core::GateKind;

// ============================================================================
// SECTION: Membership Source
// ============================================================================

/// Membership transport errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipSourceError {
    /// The query URL could not be used.
    #[error("invalid membership url: {0}")]
    InvalidUrl(String),
    /// The request failed before a response was available.
    #[error("membership request failed: {0}")]
    Request(String),
}

/// Synchronous HTTP GET against the Group Web Service.
pub trait MembershipSource: Send + Sync {
    /// Fetches the response body for `url`.
    ///
    /// Returns `Ok(None)` when the service produced no usable body (timeouts,
    /// non-success status, connection failures). Status codes are not
    /// surfaced to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipSourceError`] when the request cannot be attempted.
    fn get(&self, url: &str) -> Result<Option<String>, MembershipSourceError>;
}

// ============================================================================
// SECTION: Lookup Observer
// ============================================================================

/// Timing record for one membership lookup attempt.
#[derive(Debug, Clone)]
pub struct LookupTiming<'a> {
    /// Gate that issued the lookup.
    pub gate: GateKind,
    /// Username being checked.
    pub username: &'a str,
    /// Relying-party id of the login, when known.
    pub relying_party: Option<&'a str>,
    /// Group key or group id queried.
    pub group: &'a str,
    /// Wall time spent in the membership source.
    pub elapsed: Duration,
}

/// Sink for lookup latency observations.
pub trait LookupObserver: Send + Sync {
    /// Records one finished lookup attempt.
    fn record_lookup(&self, timing: &LookupTiming<'_>);
}

/// No-op lookup observer.
///
/// # Invariants
/// - Observations are intentionally discarded.
pub struct NoopObserver;

impl LookupObserver for NoopObserver {
    fn record_lookup(&self, _timing: &LookupTiming<'_>) {}
}
