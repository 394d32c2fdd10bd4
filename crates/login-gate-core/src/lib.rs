// crates/login-gate-core/src/lib.rs
// ============================================================================
// Module: Login Gate Core Library
// Description: Public API surface for the login gate decision engine.
// Purpose: Expose core types, collaborator interfaces, and gate policies.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Login gate core decides, at login time, whether a principal may proceed to a
//! relying party (Slack gate) or must be shown a warning banner (Warning gate).
//! Both decisions hinge on membership in a group held by an external Group Web
//! Service. The crate performs no I/O itself: the login context and the HTTP
//! transport are supplied through the traits in [`interfaces`].
//!
//! Invariants:
//! - Gates never return errors; every failure maps to a boolean decision.
//! - Gates hold only immutable configuration and are safe to share across threads.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::LookupObserver;
pub use interfaces::LookupTiming;
pub use interfaces::MembershipSource;
pub use interfaces::MembershipSourceError;
pub use interfaces::NoopObserver;
pub use runtime::LookupTimer;
pub use runtime::SlackGate;
pub use runtime::WarningGate;
pub use runtime::WarningGateConfig;
