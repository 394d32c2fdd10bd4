// crates/login-gate-core/src/core/decision.rs
// ============================================================================
// Module: Gate Decisions
// Description: Decision records, reasons, and the gate error taxonomy.
// Purpose: Carry the boolean outcome together with its audit trail.
// Dependencies: serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! A [`GateDecision`] is the boolean a host acts on plus the facts an auditor
//! needs: which gate, who, which relying party, which group, how long the
//! lookup took, and why. Decisions are logged, never persisted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::context::ContextGap;

// ============================================================================
// SECTION: Gate Kind
// ============================================================================

/// Gate that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// Login allow/deny gate.
    Slack,
    /// Warning banner gate.
    Warning,
}

impl GateKind {
    /// Returns a stable label for the gate.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures a gate absorbs into a decision.
///
/// # Invariants
/// - Never returned from a gate; recorded on [`GateDecision`] only.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum GateError {
    /// Subject or relying party could not be resolved.
    #[error("login context missing: {}", .0.as_str())]
    ContextMissing(ContextGap),
    /// The membership request failed or produced no usable body.
    #[error("membership transport failure: {0}")]
    TransportFailure(String),
    /// The membership response had no `data` member list.
    #[error("membership response missing data")]
    MalformedResponse,
    /// The gate configuration cannot produce a decision.
    #[error("gate misconfigured: {0}")]
    Misconfiguration(String),
}

impl GateError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ContextMissing(_) => "context_missing",
            Self::TransportFailure(_) => "transport_failure",
            Self::MalformedResponse => "malformed_response",
            Self::Misconfiguration(_) => "misconfiguration",
        }
    }
}

// ============================================================================
// SECTION: Reasons
// ============================================================================

/// Why a gate rendered its decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "error", rename_all = "snake_case")]
pub enum DecisionReason {
    /// The user is an effective member of the group.
    Member,
    /// The group was queried and the user is not listed.
    NotMember,
    /// The relying party differs from the configured target.
    RelyingPartyMismatch,
    /// The gate applies to every user of the relying party.
    AllUsers,
    /// A failure was absorbed by the gate's fail policy.
    Failed(GateError),
}

impl DecisionReason {
    /// Returns a stable label for the reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::NotMember => "not_member",
            Self::RelyingPartyMismatch => "relying_party_mismatch",
            Self::AllUsers => "all_users",
            Self::Failed(error) => error.kind(),
        }
    }
}

// ============================================================================
// SECTION: Decision Record
// ============================================================================

/// Outcome of one gate evaluation.
///
/// # Invariants
/// - `value` is authoritative: allow-login for the Slack gate,
///   show-warning for the Warning gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    /// Gate that produced the decision.
    pub gate: GateKind,
    /// Boolean outcome.
    pub value: bool,
    /// Reason for the outcome.
    pub reason: DecisionReason,
    /// Resolved username, when available.
    pub username: Option<String>,
    /// Resolved relying-party id, when available.
    pub relying_party: Option<String>,
    /// Group key or group id queried, when a query was planned.
    pub group: Option<String>,
    /// Membership lookup latency, when a lookup ran.
    pub elapsed_ms: Option<u64>,
}

impl GateDecision {
    /// Creates a decision with no audit context attached.
    #[must_use]
    pub const fn new(gate: GateKind, value: bool, reason: DecisionReason) -> Self {
        Self {
            gate,
            value,
            reason,
            username: None,
            relying_party: None,
            group: None,
            elapsed_ms: None,
        }
    }

    /// Attaches the resolved username.
    #[must_use]
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    /// Attaches the resolved relying-party id.
    #[must_use]
    pub fn with_relying_party(mut self, relying_party: Option<&str>) -> Self {
        self.relying_party = relying_party.map(str::to_string);
        self
    }

    /// Attaches the queried group.
    #[must_use]
    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// Attaches the lookup latency.
    #[must_use]
    pub const fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }

    /// Returns the absorbed failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&GateError> {
        match &self.reason {
            DecisionReason::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Emits the audit event for this decision.
    pub fn log(&self) {
        tracing::info!(
            gate = self.gate.as_str(),
            value = self.value,
            reason = self.reason.as_str(),
            username = self.username.as_deref(),
            rp = self.relying_party.as_deref(),
            group = self.group.as_deref(),
            elapsed_ms = self.elapsed_ms,
            "gate decision"
        );
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
