// crates/login-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Login Gate Runtime
// Description: Gate policies and the timed membership lookup they share.
// Purpose: Turn login contexts into decisions using the collaborator seams.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! Runtime modules implement the two gate policies. Both issue the same timed
//! membership lookup and differ only in how each outcome maps to a boolean.

// ============================================================================
// SECTION: Submodules
// ============================================================================

mod lookup;
pub mod slack;
pub mod timing;
pub mod warning;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use slack::SlackGate;
pub use timing::LookupTimer;
pub use timing::elapsed_millis;
pub use warning::WarningGate;
pub use warning::WarningGateConfig;
