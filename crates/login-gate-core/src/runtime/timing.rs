// crates/login-gate-core/src/runtime/timing.rs
// ============================================================================
// Module: Lookup Timing
// Description: Scoped timer around membership source calls.
// Purpose: Report lookup latency exactly once on every exit path.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! [`LookupTimer`] captures a monotonic start instant when created and emits
//! the finished-lookup event when dropped. Because emission lives in `Drop`,
//! it runs once whether the call returned a body, returned nothing, returned
//! an error, or unwound.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use crate::core::GateKind;
use crate::interfaces::LookupObserver;
use crate::interfaces::LookupTiming;

// ============================================================================
// SECTION: Timer
// ============================================================================

/// Drop guard that reports membership lookup latency.
#[must_use = "the lookup is timed until the guard is dropped"]
pub struct LookupTimer<'a> {
    /// Observer notified on drop.
    observer: &'a dyn LookupObserver,
    /// Gate that issued the lookup.
    gate: GateKind,
    /// Username being checked.
    username: &'a str,
    /// Relying-party id of the login, when known.
    relying_party: Option<&'a str>,
    /// Group key or group id queried.
    group: &'a str,
    /// Monotonic start instant.
    started: Instant,
}

impl<'a> LookupTimer<'a> {
    /// Starts timing a lookup.
    pub fn start(
        observer: &'a dyn LookupObserver,
        gate: GateKind,
        username: &'a str,
        relying_party: Option<&'a str>,
        group: &'a str,
    ) -> Self {
        Self {
            observer,
            gate,
            username,
            relying_party,
            group,
            started: Instant::now(),
        }
    }

    /// Returns the time elapsed since the timer started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for LookupTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        tracing::info!(
            gate = self.gate.as_str(),
            username = self.username,
            rp = self.relying_party,
            group = self.group,
            elapsed_ms = elapsed_millis(elapsed),
            "membership lookup finished"
        );
        self.observer.record_lookup(&LookupTiming {
            gate: self.gate,
            username: self.username,
            relying_party: self.relying_party,
            group: self.group,
            elapsed,
        });
    }
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
#[must_use]
pub fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
