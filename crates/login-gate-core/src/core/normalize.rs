// crates/login-gate-core/src/core/normalize.rs
// ============================================================================
// Module: Relying-Party Key Normalization
// Description: Derives group-lookup keys from raw relying-party identifiers.
// Purpose: Map URL, OIDC, and entity-id forms onto one safe path segment.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Relying parties arrive as URLs (`https://host/path`), OIDC client ids
//! (`oidc/client`), or opaque entity ids (`urn:mace:...`). The normalizer
//! reduces each to the host or client segment, or to a lower-cased sanitized
//! form of an opaque id, which then names the authorization group.
//!
//! Invariants:
//! - Normalization is pure and total: every input yields a key, none panic.
//! - Keys contain only ASCII alphanumerics, `.` and `-`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefixes stripped from relying-party ids, in match order.
const STRIPPED_PREFIXES: [&str; 3] = ["http://", "https://", "oidc/"];

/// Replacement for characters outside the key charset.
const REPLACEMENT: char = '-';

// ============================================================================
// SECTION: Key Type
// ============================================================================

/// Normalized group key derived from a relying-party identifier.
///
/// # Invariants
/// - Produced only by [`normalize`].
/// - Contains only `[0-9A-Za-z.-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedGroupKey(String);

impl NormalizedGroupKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedGroupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes a raw relying-party identifier into a group key.
///
/// Rules, first match wins:
/// 1. `http://`, `https://` or `oidc/` prefixes are stripped and the remainder
///    is cut at its first `/` (a leading `/` is kept). Case is preserved.
/// 2. Any other id is lower-cased.
///
/// Characters outside the key charset are then replaced with `-`.
#[must_use]
pub fn normalize(raw: &str) -> NormalizedGroupKey {
    let key = STRIPPED_PREFIXES.iter().find_map(|prefix| raw.strip_prefix(prefix)).map_or_else(
        || sanitize(&raw.to_lowercase()),
        |remainder| sanitize(truncate_at_separator(remainder)),
    );
    NormalizedGroupKey(key)
}

/// Cuts the value at its first `/` unless the separator is the first character.
fn truncate_at_separator(value: &str) -> &str {
    match value.find('/') {
        Some(index) if index > 0 => &value[.. index],
        _ => value,
    }
}

/// Replaces every character outside `[0-9A-Za-z.-]` with `-`.
fn sanitize(value: &str) -> String {
    value.chars().map(|ch| if is_key_char(ch) { ch } else { REPLACEMENT }).collect()
}

/// Returns true when the character is legal inside a group key.
const fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '.' || ch == '-'
}

// ============================================================================
// SECTION: Tests
// ============================================================================
