// crates/login-gate-core/src/runtime/slack.rs
// ============================================================================
// Module: Slack Gate
// Description: Allow/deny login gate keyed by relying-party group membership.
// Purpose: Block logins to a relying party for users outside its authz group.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! The Slack gate derives an authorization group from the requesting relying
//! party and allows the login only when the user is an effective member.
//! The gate fails open: an unidentifiable user, an unresolvable relying party,
//! a silent service, or a broken exchange all allow the login. Only a
//! definite "not a member" or a response without a member list denies.
//!
//! | Outcome | Allow |
//! | --- | --- |
//! | no subject / principal | yes |
//! | no relying party id | yes |
//! | `Matched` | yes |
//! | `NotMatched` | no |
//! | `Indeterminate(NoResponse)` | yes |
//! | `Indeterminate(MalformedResponse)` | no |
//! | `Indeterminate(TransportError)` | yes |

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::DecisionReason;
use crate::core::GateDecision;
use crate::core::GateError;
use crate::core::GateKind;
use crate::core::IndeterminateReason;
use crate::core::LoginContext;
use crate::core::MembershipQueryResult;
use crate::core::normalize;
use crate::interfaces::LookupObserver;
use crate::interfaces::MembershipSource;
use crate::interfaces::NoopObserver;
use crate::runtime::lookup::GroupLookup;
use crate::runtime::lookup::run_lookup;

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Login gate allowing only effective members of the relying party's group.
///
/// # Invariants
/// - Configuration is fixed at construction.
/// - Evaluations share no mutable state.
pub struct SlackGate {
    /// Group Web Service base URL; the group key is appended directly.
    gws_url_base: String,
    /// Membership transport.
    source: Arc<dyn MembershipSource>,
    /// Lookup latency sink.
    observer: Arc<dyn LookupObserver>,
}

impl SlackGate {
    /// Creates a Slack gate querying groups under `gws_url_base`.
    #[must_use]
    pub fn new(gws_url_base: impl Into<String>, source: Arc<dyn MembershipSource>) -> Self {
        let gws_url_base = gws_url_base.into();
        tracing::info!(gate = "slack", gws_url_base = %gws_url_base, "gate configured");
        Self {
            gws_url_base,
            source,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replaces the lookup observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn LookupObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the configured Group Web Service base URL.
    #[must_use]
    pub fn gws_url_base(&self) -> &str {
        &self.gws_url_base
    }

    /// Returns true when the login may proceed.
    #[must_use]
    pub fn allows(&self, ctx: &dyn LoginContext) -> bool {
        self.evaluate(ctx).value
    }

    /// Evaluates the gate and logs the decision.
    #[must_use]
    pub fn evaluate(&self, ctx: &dyn LoginContext) -> GateDecision {
        let decision = self.decide(ctx);
        decision.log();
        decision
    }

    /// Runs the gate state machine.
    fn decide(&self, ctx: &dyn LoginContext) -> GateDecision {
        let username = match ctx.username() {
            Ok(username) => username,
            Err(gap) => {
                tracing::warn!(
                    gate = "slack",
                    gap = gap.as_str(),
                    "no principal name available to check membership"
                );
                return GateDecision::new(
                    GateKind::Slack,
                    true,
                    DecisionReason::Failed(GateError::ContextMissing(gap)),
                );
            }
        };
        tracing::debug!(gate = "slack", username, "user found in subject context");

        let relying_party = match ctx.relying_party_id() {
            Ok(relying_party) => relying_party,
            Err(gap) => {
                tracing::error!(
                    gate = "slack",
                    username,
                    gap = gap.as_str(),
                    "relying party context not found"
                );
                return GateDecision::new(
                    GateKind::Slack,
                    true,
                    DecisionReason::Failed(GateError::ContextMissing(gap)),
                )
                .with_username(username);
            }
        };
        tracing::info!(gate = "slack", username, rp = relying_party, "slack lookup");

        let key = normalize(relying_party);
        tracing::info!(gate = "slack", group = %key, "authz group resolved");

        let outcome = run_lookup(
            self.source.as_ref(),
            self.observer.as_ref(),
            &GroupLookup {
                gate: GateKind::Slack,
                gws_url_base: &self.gws_url_base,
                group: key.as_str(),
                username,
                relying_party: Some(relying_party),
            },
        );

        let (allowed, reason) = match outcome.result {
            MembershipQueryResult::Matched => (true, DecisionReason::Member),
            MembershipQueryResult::NotMatched => {
                tracing::info!(
                    gate = "slack",
                    username,
                    group = %key,
                    ids = %outcome.seen_ids.join(","),
                    "username not found in group service data"
                );
                (false, DecisionReason::NotMember)
            }
            MembershipQueryResult::Indeterminate(IndeterminateReason::MalformedResponse) => {
                tracing::info!(
                    gate = "slack",
                    username,
                    group = %key,
                    "group service response has no member data"
                );
                let error = outcome.failure(IndeterminateReason::MalformedResponse);
                (false, DecisionReason::Failed(error))
            }
            MembershipQueryResult::Indeterminate(reason) => {
                (true, DecisionReason::Failed(outcome.failure(reason)))
            }
        };

        GateDecision::new(GateKind::Slack, allowed, reason)
            .with_username(username)
            .with_relying_party(Some(relying_party))
            .with_group(key.as_str())
            .with_elapsed_ms(outcome.elapsed_ms)
    }
}
