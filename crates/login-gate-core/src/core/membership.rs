// crates/login-gate-core/src/core/membership.rs
// ============================================================================
// Module: Membership Matching
// Description: Parses Group Web Service responses and tests for a member.
// Purpose: Reduce a raw response body to a tri-state membership result.
// Dependencies: serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! The Group Web Service answers an `effective_member` query with
//! `{"data": [{"id": "<username>"}, ...]}`. Matching keeps three outcomes
//! apart: the service listed the user, the service did not, or the exchange
//! gave no usable answer. Only the gate policies collapse these to a boolean.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Result Types
// ============================================================================

/// Reason a membership query produced no definite answer.
///
/// # Invariants
/// - Variants are stable labels for programmatic handling and audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndeterminateReason {
    /// The collaborator returned no body.
    NoResponse,
    /// The body parsed but `data` was missing or null.
    MalformedResponse,
    /// The request failed or the body could not be decoded.
    TransportError,
}

impl IndeterminateReason {
    /// Returns a stable label for the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoResponse => "no_response",
            Self::MalformedResponse => "malformed_response",
            Self::TransportError => "transport_error",
        }
    }
}

/// Tri-state membership outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum MembershipQueryResult {
    /// The username appears in the member list.
    Matched,
    /// The member list was present and did not contain the username.
    NotMatched,
    /// No definite answer was obtained.
    Indeterminate(IndeterminateReason),
}

impl MembershipQueryResult {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::NotMatched => "not_matched",
            Self::Indeterminate(reason) => reason.as_str(),
        }
    }
}

/// Membership outcome plus the ids scanned on a miss.
///
/// # Invariants
/// - `seen_ids` is populated only when `result` is [`MembershipQueryResult::NotMatched`].
/// - `seen_ids` is diagnostic only and never influences a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipMatch {
    /// Tri-state membership outcome.
    pub result: MembershipQueryResult,
    /// Member ids seen while scanning, in response order.
    pub seen_ids: Vec<String>,
}

impl MembershipMatch {
    /// Builds an outcome without diagnostics.
    const fn bare(result: MembershipQueryResult) -> Self {
        Self {
            result,
            seen_ids: Vec::new(),
        }
    }

    /// Builds an indeterminate outcome.
    const fn indeterminate(reason: IndeterminateReason) -> Self {
        Self::bare(MembershipQueryResult::Indeterminate(reason))
    }
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Tests a Group Web Service response body for `username`.
///
/// Comparison is exact string equality with no case folding. The scan stops
/// at the first matching member, so entries after it are never inspected.
#[must_use]
pub fn match_members(body: Option<&str>, username: &str) -> MembershipMatch {
    let Some(body) = body else {
        return MembershipMatch::indeterminate(IndeterminateReason::NoResponse);
    };
    let Ok(Value::Object(root)) = serde_json::from_str::<Value>(body) else {
        tracing::debug!("membership response is not a json object");
        return MembershipMatch::indeterminate(IndeterminateReason::TransportError);
    };
    let members = match root.get("data") {
        None | Some(Value::Null) => {
            return MembershipMatch::indeterminate(IndeterminateReason::MalformedResponse);
        }
        Some(Value::Array(members)) => members,
        Some(_) => {
            tracing::debug!("membership response data is not an array");
            return MembershipMatch::indeterminate(IndeterminateReason::TransportError);
        }
    };
    if members.is_empty() {
        return MembershipMatch::bare(MembershipQueryResult::NotMatched);
    }

    let mut seen_ids = Vec::with_capacity(members.len());
    for member in members {
        let Some(id) = member.get("id").and_then(Value::as_str) else {
            tracing::debug!("membership entry has no string id");
            return MembershipMatch::indeterminate(IndeterminateReason::TransportError);
        };
        tracing::debug!(member = id, "scanned group member");
        if id == username {
            return MembershipMatch::bare(MembershipQueryResult::Matched);
        }
        seen_ids.push(id.to_string());
    }
    MembershipMatch {
        result: MembershipQueryResult::NotMatched,
        seen_ids,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
