// crates/login-gate-config/src/config.rs
// ============================================================================
// Module: Login Gate Configuration
// Description: Configuration loading and validation for the login gates.
// Purpose: Provide strict config parsing with hard limits.
// Dependencies: login-gate-core, login-gate-providers, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `LOGIN_GATE_CONFIG`, then
//! `login-gate.toml` in the working directory.
//!
//! A warning entry with neither `target_rpid` nor `group_id` still loads; the
//! gate reports the misconfiguration at evaluation time and never warns.
//! [`LoginGateConfig::diagnostics`] lists such entries for operators.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use login_gate_core::MembershipSource;
use login_gate_core::SlackGate;
use login_gate_core::WarningGate;
use login_gate_core::WarningGateConfig;
use login_gate_providers::GwsHttpConfig;
use login_gate_providers::http::DEFAULT_MAX_RESPONSE_BYTES;
use login_gate_providers::http::DEFAULT_TIMEOUT_MS;
use login_gate_providers::http::DEFAULT_USER_AGENT;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "login-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "LOGIN_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 30_000;
/// Maximum allowed response size limit in bytes.
pub(crate) const MAX_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;
/// Maximum number of warning entries.
pub(crate) const MAX_WARNING_ENTRIES: usize = 128;
/// Maximum length of a warning entry name.
pub(crate) const MAX_WARNING_NAME_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Login gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginGateConfig {
    /// Group Web Service connection settings.
    pub gws: GwsConfig,
    /// Slack gate settings.
    #[serde(default)]
    pub slack: SlackConfig,
    /// Named warning gates.
    #[serde(default)]
    pub warning: Vec<WarningEntry>,
}

impl LoginGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_resolved(&resolve_path(path)?)
    }

    /// Loads configuration from an already resolved path.
    fn load_resolved(resolved: &Path) -> Result<Self, ConfigError> {
        validate_path(resolved)?;
        let bytes = fs::read(resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::parse(content)?;
        tracing::info!(
            path = %resolved.display(),
            warnings = config.warning.len(),
            slack = config.slack.enabled,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gws.validate()?;
        if self.warning.len() > MAX_WARNING_ENTRIES {
            return Err(ConfigError::Invalid("too many warning entries".to_string()));
        }
        let mut names = BTreeSet::new();
        for entry in &self.warning {
            entry.validate()?;
            if !names.insert(entry.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate warning name: {}",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    /// Returns operator-facing notes for entries that load but never fire.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if !self.slack.enabled {
            notes.push("slack gate is disabled".to_string());
        }
        for entry in &self.warning {
            if !entry.gate_config(&self.gws.url_base).is_configured() {
                notes.push(format!(
                    "warning.{}: neither target_rpid nor group_id is set; the gate never warns",
                    entry.name
                ));
            }
        }
        notes
    }

    /// Builds the configured gates around a shared membership source.
    #[must_use]
    pub fn build_gates(&self, source: Arc<dyn MembershipSource>) -> GateSet {
        let slack = self
            .slack
            .enabled
            .then(|| SlackGate::new(self.gws.url_base.clone(), Arc::clone(&source)));
        let warnings = self
            .warning
            .iter()
            .map(|entry| {
                let gate =
                    WarningGate::new(entry.gate_config(&self.gws.url_base), Arc::clone(&source));
                (entry.name.clone(), gate)
            })
            .collect();
        GateSet {
            slack,
            warnings,
        }
    }
}

/// Group Web Service connection settings.
///
/// `Debug` output redacts `bearer_token`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GwsConfig {
    /// Base URL; group keys are appended directly.
    pub url_base: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Allow cleartext HTTP (disabled by default).
    #[serde(default)]
    pub allow_http: bool,
    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl fmt::Debug for GwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GwsConfig")
            .field("url_base", &self.url_base)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_response_bytes", &self.max_response_bytes)
            .field("user_agent", &self.user_agent)
            .field("allow_http", &self.allow_http)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GwsConfig {
    /// Validates connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a setting is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_base.trim().is_empty() {
            return Err(ConfigError::Invalid("gws.url_base must be non-empty".to_string()));
        }
        let url = Url::parse(&self.url_base)
            .map_err(|err| ConfigError::Invalid(format!("gws.url_base is not a url: {err}")))?;
        match url.scheme() {
            "https" => {}
            "http" if self.allow_http => {}
            "http" => {
                return Err(ConfigError::Invalid(
                    "gws.url_base uses http but allow_http is false".to_string(),
                ));
            }
            _ => return Err(ConfigError::Invalid("gws.url_base must be http(s)".to_string())),
        }
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "gws.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if !(1 ..= MAX_MAX_RESPONSE_BYTES).contains(&self.max_response_bytes) {
            return Err(ConfigError::Invalid(format!(
                "gws.max_response_bytes must be between 1 and {MAX_MAX_RESPONSE_BYTES}"
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("gws.user_agent must be non-empty".to_string()));
        }
        if self.bearer_token.as_deref().is_some_and(|token| token.trim().is_empty()) {
            return Err(ConfigError::Invalid("gws.bearer_token must be non-empty".to_string()));
        }
        Ok(())
    }

    /// Returns the HTTP source settings for this service.
    #[must_use]
    pub fn http_config(&self) -> GwsHttpConfig {
        GwsHttpConfig {
            allow_http: self.allow_http,
            timeout_ms: self.timeout_ms,
            max_response_bytes: self.max_response_bytes,
            user_agent: self.user_agent.clone(),
            bearer_token: self.bearer_token.clone(),
        }
    }
}

/// Slack gate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlackConfig {
    /// Builds the Slack gate when true.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
        }
    }
}

/// One named warning gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningEntry {
    /// Unique entry name.
    pub name: String,
    /// Relying-party id the warning is limited to.
    #[serde(default)]
    pub target_rpid: Option<String>,
    /// Group whose effective members see the warning.
    #[serde(default)]
    pub group_id: Option<String>,
}

impl WarningEntry {
    /// Validates the entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the name is empty or too long.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("warning.name must be non-empty".to_string()));
        }
        if self.name.len() > MAX_WARNING_NAME_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "warning.name exceeds {MAX_WARNING_NAME_LENGTH} bytes"
            )));
        }
        Ok(())
    }

    /// Returns the gate configuration for this entry.
    #[must_use]
    pub fn gate_config(&self, gws_url_base: &str) -> WarningGateConfig {
        WarningGateConfig {
            gws_url_base: gws_url_base.to_string(),
            target_rpid: self.target_rpid.clone(),
            group_id: self.group_id.clone(),
        }
    }
}

// ============================================================================
// SECTION: Gate Set
// ============================================================================

/// Gates built from one configuration.
pub struct GateSet {
    /// Slack gate, when enabled.
    pub slack: Option<SlackGate>,
    /// Warning gates by entry name.
    pub warnings: BTreeMap<String, WarningGate>,
}

impl GateSet {
    /// Returns the warning gate with the given name.
    #[must_use]
    pub fn warning(&self, name: &str) -> Option<&WarningGate> {
        self.warnings.get(name)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    resolve_path_with(path, env::var(CONFIG_ENV_VAR).ok())
}

/// Resolves the config path given the value of [`CONFIG_ENV_VAR`].
fn resolve_path_with(
    path: Option<&Path>,
    env_path: Option<String>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Default request timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default response size limit.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default user agent.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Serde default for enabled flags.
const fn default_true() -> bool {
    true
}

// ============================================================================
// SECTION: Tests
// ============================================================================
