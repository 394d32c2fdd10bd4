// crates/login-gate-core/src/core/context.rs
// ============================================================================
// Module: Login Context
// Description: Capability view over the surrounding authentication pipeline.
// Purpose: Resolve the principal name and relying-party id for one login.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The identity provider owns the real request context. Gates only need two
//! facts from it, so the context is modelled as a capability trait with two
//! accessors. Missing pieces are ordinary input states reported through
//! [`ContextGap`], never defects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Context Values
// ============================================================================

/// Authenticated subject attached to a login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectContext {
    /// Canonical principal name, when the pipeline resolved one.
    #[serde(default)]
    pub principal_name: Option<String>,
}

/// Relying party that requested the login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelyingPartyContext {
    /// Raw relying-party identifier (URL, OIDC client id, or entity id).
    #[serde(default)]
    pub relying_party_id: Option<String>,
}

/// Reason a context lookup produced no usable value.
///
/// # Invariants
/// - Variants are stable labels for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextGap {
    /// No subject context is attached.
    NoSubject,
    /// Subject context carries no principal name.
    NoPrincipalName,
    /// No relying-party context is attached.
    NoRelyingParty,
    /// Relying-party context carries no identifier.
    NoRelyingPartyId,
}

impl ContextGap {
    /// Returns a stable label for the gap.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoSubject => "no_subject",
            Self::NoPrincipalName => "no_principal_name",
            Self::NoRelyingParty => "no_relying_party",
            Self::NoRelyingPartyId => "no_relying_party_id",
        }
    }
}

// ============================================================================
// SECTION: Capability Trait
// ============================================================================

/// Read-only view of the login being evaluated.
pub trait LoginContext {
    /// Returns the subject context, if one is attached.
    fn subject(&self) -> Option<&SubjectContext>;

    /// Returns the relying-party context, if one is attached.
    fn relying_party(&self) -> Option<&RelyingPartyContext>;

    /// Resolves the principal name.
    ///
    /// An empty principal name is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ContextGap`] when no subject or principal name is available.
    fn username(&self) -> Result<&str, ContextGap> {
        let subject = self.subject().ok_or(ContextGap::NoSubject)?;
        subject
            .principal_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(ContextGap::NoPrincipalName)
    }

    /// Resolves the raw relying-party identifier.
    ///
    /// An empty identifier is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ContextGap`] when no relying-party context or id is available.
    fn relying_party_id(&self) -> Result<&str, ContextGap> {
        let relying_party = self.relying_party().ok_or(ContextGap::NoRelyingParty)?;
        relying_party
            .relying_party_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ContextGap::NoRelyingPartyId)
    }
}

// ============================================================================
// SECTION: Owned Request
// ============================================================================

/// Owned login context for hosts that do not carry their own context type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Subject context.
    #[serde(default)]
    pub subject: Option<SubjectContext>,
    /// Relying-party context.
    #[serde(default)]
    pub relying_party: Option<RelyingPartyContext>,
}

impl LoginRequest {
    /// Creates a request with both a principal name and a relying-party id.
    #[must_use]
    pub fn new(username: impl Into<String>, relying_party_id: impl Into<String>) -> Self {
        Self::default().with_username(username).with_relying_party_id(relying_party_id)
    }

    /// Attaches a subject carrying the given principal name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.subject = Some(SubjectContext {
            principal_name: Some(username.into()),
        });
        self
    }

    /// Attaches a relying-party context carrying the given identifier.
    #[must_use]
    pub fn with_relying_party_id(mut self, relying_party_id: impl Into<String>) -> Self {
        self.relying_party = Some(RelyingPartyContext {
            relying_party_id: Some(relying_party_id.into()),
        });
        self
    }
}

impl LoginContext for LoginRequest {
    fn subject(&self) -> Option<&SubjectContext> {
        self.subject.as_ref()
    }

    fn relying_party(&self) -> Option<&RelyingPartyContext> {
        self.relying_party.as_ref()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
