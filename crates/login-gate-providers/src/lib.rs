// crates/login-gate-providers/src/lib.rs
// ============================================================================
// Module: Login Gate Providers
// Description: Network-backed collaborators for the login gate core.
// Purpose: Reach the Group Web Service over bounded blocking HTTP.
// Dependencies: login-gate-core, reqwest, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate ships [`GwsHttpSource`], the reqwest-backed
//! [`MembershipSource`](login_gate_core::MembershipSource) used in
//! deployments. It enforces scheme restrictions, disables redirects, and caps
//! response sizes so a misbehaving service degrades to "no response".

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::GwsHttpConfig;
pub use http::GwsHttpSource;
pub use http::HttpSourceError;
