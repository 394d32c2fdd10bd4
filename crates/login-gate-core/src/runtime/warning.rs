// crates/login-gate-core/src/runtime/warning.rs
// ============================================================================
// Module: Warning Gate
// Description: Decides whether a login should display a warning banner.
// Purpose: Target a banner at one relying party, one group, or both.
// Dependencies: crate::{core, interfaces}, serde, tracing
// ============================================================================

//! ## Overview
//! A warning gate is configured with a target relying party, a group id, or
//! both. With a target, only logins to that relying party can warn. With a
//! group, only effective members of that group see the warning; without one,
//! every user of the target relying party does.
//!
//! The gate fails closed end-to-end: misconfiguration, missing context, and
//! every indeterminate lookup suppress the warning.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::core::DecisionReason;
use crate::core::GateDecision;
use crate::core::GateError;
use crate::core::GateKind;
use crate::core::LoginContext;
use crate::core::MembershipQueryResult;
use crate::interfaces::LookupObserver;
use crate::interfaces::MembershipSource;
use crate::interfaces::NoopObserver;
use crate::runtime::lookup::GroupLookup;
use crate::runtime::lookup::run_lookup;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Warning gate configuration.
///
/// # Invariants
/// - Empty strings are treated the same as unset values.
/// - At least one of `target_rpid` or `group_id` must be set for the gate to warn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningGateConfig {
    /// Group Web Service base URL; the group id is appended directly.
    pub gws_url_base: String,
    /// Relying-party id the warning is limited to.
    #[serde(default)]
    pub target_rpid: Option<String>,
    /// Group whose effective members see the warning.
    #[serde(default)]
    pub group_id: Option<String>,
}

impl WarningGateConfig {
    /// Returns the target relying-party id when set and non-empty.
    #[must_use]
    pub fn target_rpid(&self) -> Option<&str> {
        self.target_rpid.as_deref().filter(|value| !value.is_empty())
    }

    /// Returns the group id when set and non-empty.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref().filter(|value| !value.is_empty())
    }

    /// Returns true when at least one selector is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.target_rpid().is_some() || self.group_id().is_some()
    }
}

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Gate deciding whether a login shows a warning banner.
///
/// # Invariants
/// - Configuration is fixed at construction.
/// - Every failure path returns `false`.
pub struct WarningGate {
    /// Gate configuration.
    config: WarningGateConfig,
    /// Membership transport.
    source: Arc<dyn MembershipSource>,
    /// Lookup latency sink.
    observer: Arc<dyn LookupObserver>,
}

impl WarningGate {
    /// Creates a warning gate.
    #[must_use]
    pub fn new(config: WarningGateConfig, source: Arc<dyn MembershipSource>) -> Self {
        tracing::info!(
            gate = "warning",
            gws_url_base = %config.gws_url_base,
            target_rpid = config.target_rpid(),
            group_id = config.group_id(),
            "gate configured"
        );
        Self {
            config,
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

    /// Returns the gate configuration.
    #[must_use]
    pub const fn config(&self) -> &WarningGateConfig {
        &self.config
    }

    /// Returns true when the warning should be shown.
    #[must_use]
    pub fn shows_warning(&self, ctx: &dyn LoginContext) -> bool {
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
        let target = self.config.target_rpid();
        let group = self.config.group_id();
        if target.is_none() && group.is_none() {
            tracing::error!(
                gate = "warning",
                "misconfigured intercept: caller must set either target_rpid or group_id"
            );
            return suppressed(DecisionReason::Failed(GateError::Misconfiguration(
                "neither target_rpid nor group_id is set".to_string(),
            )));
        }

        let relying_party = match target {
            Some(target) => {
                let resolved = match ctx.relying_party_id() {
                    Ok(resolved) => resolved,
                    Err(gap) => {
                        tracing::error!(
                            gate = "warning",
                            gap = gap.as_str(),
                            "relying party context not found"
                        );
                        return suppressed(DecisionReason::Failed(GateError::ContextMissing(gap)));
                    }
                };
                if resolved != target {
                    tracing::debug!(
                        gate = "warning",
                        rp = resolved,
                        target_rpid = target,
                        "relying party does not match the target"
                    );
                    return suppressed(DecisionReason::RelyingPartyMismatch)
                        .with_relying_party(Some(resolved));
                }
                Some(resolved)
            }
            None => ctx.relying_party_id().ok(),
        };

        let Some(group) = group else {
            tracing::info!(
                gate = "warning",
                rp = relying_party,
                "warning enabled for all users of relying party"
            );
            return GateDecision::new(GateKind::Warning, true, DecisionReason::AllUsers)
                .with_relying_party(relying_party);
        };

        let username = match ctx.username() {
            Ok(username) => username,
            Err(gap) => {
                tracing::warn!(gate = "warning", gap = gap.as_str(), "no principal name available");
                return suppressed(DecisionReason::Failed(GateError::ContextMissing(gap)))
                    .with_relying_party(relying_party)
                    .with_group(group);
            }
        };
        tracing::debug!(gate = "warning", username, "user found in subject context");
        tracing::info!(gate = "warning", username, rp = relying_party, "warning lookup");

        let outcome = run_lookup(
            self.source.as_ref(),
            self.observer.as_ref(),
            &GroupLookup {
                gate: GateKind::Warning,
                gws_url_base: &self.config.gws_url_base,
                group,
                username,
                relying_party,
            },
        );

        let (warn, reason) = match outcome.result {
            MembershipQueryResult::Matched => {
                tracing::info!(gate = "warning", username, group, "user is a member of group");
                (true, DecisionReason::Member)
            }
            MembershipQueryResult::NotMatched if outcome.seen_ids.is_empty() => {
                tracing::info!(
                    gate = "warning",
                    username,
                    group,
                    "no records response from group service"
                );
                (false, DecisionReason::NotMember)
            }
            MembershipQueryResult::NotMatched => {
                tracing::info!(
                    gate = "warning",
                    username,
                    group,
                    ids = %outcome.seen_ids.join(","),
                    "username not found in group service data"
                );
                (false, DecisionReason::NotMember)
            }
            MembershipQueryResult::Indeterminate(reason) => {
                (false, DecisionReason::Failed(outcome.failure(reason)))
            }
        };

        GateDecision::new(GateKind::Warning, warn, reason)
            .with_username(username)
            .with_relying_party(relying_party)
            .with_group(group)
            .with_elapsed_ms(outcome.elapsed_ms)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a suppressed-warning decision.
const fn suppressed(reason: DecisionReason) -> GateDecision {
    GateDecision::new(GateKind::Warning, false, reason)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
