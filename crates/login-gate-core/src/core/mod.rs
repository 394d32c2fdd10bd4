// crates/login-gate-core/src/core/mod.rs
// ============================================================================
// Module: Login Gate Core Types
// Description: Context, key, membership, and decision types.
// Purpose: Provide the per-evaluation data model shared by both gates.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe one login evaluation from context to decision. Every
//! value here is created per evaluation and discarded once the decision is
//! rendered; none of them carries state across requests.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod context;
pub mod decision;
pub mod membership;
pub mod normalize;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::ContextGap;
pub use context::LoginContext;
pub use context::LoginRequest;
pub use context::RelyingPartyContext;
pub use context::SubjectContext;
pub use decision::DecisionReason;
pub use decision::GateDecision;
pub use decision::GateError;
pub use decision::GateKind;
pub use membership::IndeterminateReason;
pub use membership::MembershipMatch;
pub use membership::MembershipQueryResult;
pub use membership::match_members;
pub use normalize::NormalizedGroupKey;
pub use normalize::normalize;
