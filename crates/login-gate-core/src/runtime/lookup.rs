// crates/login-gate-core/src/runtime/lookup.rs
// ============================================================================
// Module: Membership Lookup
// Description: Timed effective-member query shared by both gates.
// Purpose: Build the query URL, call the source, and classify the response.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! One lookup is one `effective_member` GET. Collaborator errors and
//! collaborator panics are logged here and folded into
//! [`IndeterminateReason::TransportError`] so the gates only ever see the
//! tri-state result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use crate::core::GateError;
use crate::core::GateKind;
use crate::core::IndeterminateReason;
use crate::core::MembershipQueryResult;
use crate::core::match_members;
use crate::interfaces::LookupObserver;
use crate::interfaces::MembershipSource;
use crate::runtime::timing::LookupTimer;
use crate::runtime::timing::elapsed_millis;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path segment between the group and the username.
const EFFECTIVE_MEMBER_SEGMENT: &str = "/effective_member/";

// ============================================================================
// SECTION: Lookup Types
// ============================================================================

/// Identity of one membership lookup.
pub(crate) struct GroupLookup<'a> {
    /// Gate issuing the lookup.
    pub(crate) gate: GateKind,
    /// Group Web Service base URL, used by plain concatenation.
    pub(crate) gws_url_base: &'a str,
    /// Group key or group id.
    pub(crate) group: &'a str,
    /// Username checked for membership.
    pub(crate) username: &'a str,
    /// Relying-party id of the login, when known.
    pub(crate) relying_party: Option<&'a str>,
}

/// Classified result of one lookup.
pub(crate) struct LookupOutcome {
    /// Tri-state membership result.
    pub(crate) result: MembershipQueryResult,
    /// Ids scanned on a miss, for diagnostics.
    pub(crate) seen_ids: Vec<String>,
    /// Latency of the source call in milliseconds.
    pub(crate) elapsed_ms: u64,
    /// Collaborator error message, when the source returned one.
    pub(crate) source_error: Option<String>,
}

impl LookupOutcome {
    /// Returns the gate error for an indeterminate outcome.
    pub(crate) fn failure(&self, reason: IndeterminateReason) -> GateError {
        match reason {
            IndeterminateReason::MalformedResponse => GateError::MalformedResponse,
            IndeterminateReason::NoResponse => {
                GateError::TransportFailure("no response from group service".to_string())
            }
            IndeterminateReason::TransportError => GateError::TransportFailure(
                self.source_error
                    .clone()
                    .unwrap_or_else(|| "undecodable group service response".to_string()),
            ),
        }
    }
}

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Builds the `effective_member` query URL.
pub(crate) fn membership_url(gws_url_base: &str, group: &str, username: &str) -> String {
    let mut url = String::with_capacity(
        gws_url_base.len() + group.len() + EFFECTIVE_MEMBER_SEGMENT.len() + username.len(),
    );
    url.push_str(gws_url_base);
    url.push_str(group);
    url.push_str(EFFECTIVE_MEMBER_SEGMENT);
    url.push_str(username);
    url
}

/// Runs one timed membership lookup.
pub(crate) fn run_lookup(
    source: &dyn MembershipSource,
    observer: &dyn LookupObserver,
    lookup: &GroupLookup<'_>,
) -> LookupOutcome {
    let url = membership_url(lookup.gws_url_base, lookup.group, lookup.username);
    let (response, elapsed) = {
        let timer = LookupTimer::start(
            observer,
            lookup.gate,
            lookup.username,
            lookup.relying_party,
            lookup.group,
        );
        let response = catch_unwind(AssertUnwindSafe(|| source.get(&url)));
        (response, timer.elapsed())
    };
    let elapsed_ms = elapsed_millis(elapsed);

    let response = match response {
        Ok(response) => response,
        Err(payload) => {
            let message = format!("membership source panicked: {}", panic_message(&*payload));
            tracing::error!(
                gate = lookup.gate.as_str(),
                username = lookup.username,
                rp = lookup.relying_party,
                group = lookup.group,
                error = %message,
                "group service lookup failed"
            );
            return LookupOutcome {
                result: MembershipQueryResult::Indeterminate(IndeterminateReason::TransportError),
                seen_ids: Vec::new(),
                elapsed_ms,
                source_error: Some(message),
            };
        }
    };

    match response {
        Ok(Some(body)) => {
            let matched = match_members(Some(&body), lookup.username);
            LookupOutcome {
                result: matched.result,
                seen_ids: matched.seen_ids,
                elapsed_ms,
                source_error: None,
            }
        }
        Ok(None) => {
            tracing::info!(
                gate = lookup.gate.as_str(),
                username = lookup.username,
                rp = lookup.relying_party,
                group = lookup.group,
                "null response from group service"
            );
            LookupOutcome {
                result: MembershipQueryResult::Indeterminate(IndeterminateReason::NoResponse),
                seen_ids: Vec::new(),
                elapsed_ms,
                source_error: None,
            }
        }
        Err(err) => {
            tracing::error!(
                gate = lookup.gate.as_str(),
                username = lookup.username,
                rp = lookup.relying_party,
                group = lookup.group,
                error = %err,
                "group service lookup failed"
            );
            LookupOutcome {
                result: MembershipQueryResult::Indeterminate(IndeterminateReason::TransportError),
                seen_ids: Vec::new(),
                elapsed_ms,
                source_error: Some(err.to_string()),
            }
        }
    }
}

/// Extracts the message carried by a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return message;
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message;
    }
    "unknown panic payload"
}

// ============================================================================
// SECTION: Tests
// ============================================================================
