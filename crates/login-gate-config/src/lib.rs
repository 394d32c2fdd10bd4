// crates/login-gate-config/src/lib.rs
// ============================================================================
// Module: Login Gate Config Library
// Description: Canonical config model, validation, and gate construction.
// Purpose: Single source of truth for login-gate.toml semantics.
// Dependencies: login-gate-core, login-gate-providers, serde, toml, url
// ============================================================================

//! ## Overview
//! `login-gate-config` defines the configuration model for the login gates.
//! Loading is strict: unknown fields, oversized files, and out-of-range limits
//! are rejected before any gate is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
