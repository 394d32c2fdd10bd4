// crates/login-gate-providers/src/http.rs
// ============================================================================
// Module: Group Web Service HTTP Source
// Description: Blocking HTTP GET transport for effective-member queries.
// Purpose: Fetch membership bodies with strict limits and no redirects.
// Dependencies: login-gate-core, reqwest, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`GwsHttpSource`] issues one bounded GET per lookup. Anything the service
//! does wrong (non-success status, connection failure, oversized or
//! non-UTF-8 body) becomes `Ok(None)` after a warning, leaving the gate's fail
//! policy in charge. Only a URL the source refuses to request is an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io::Read;
use std::time::Duration;

use login_gate_core::MembershipSource;
use login_gate_core::MembershipSourceError;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use thiserror::Error;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
/// Default response size limit in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "login-gate/0.1";

/// Configuration for the Group Web Service HTTP source.
///
/// `Debug` output redacts `bearer_token`.
#[derive(Clone, PartialEq, Eq)]
pub struct GwsHttpConfig {
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Optional bearer token sent with every request.
    pub bearer_token: Option<String>,
}

impl Default for GwsHttpConfig {
    fn default() -> Self {
        Self {
            allow_http: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bearer_token: None,
        }
    }
}

impl fmt::Debug for GwsHttpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GwsHttpConfig")
            .field("allow_http", &self.allow_http)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_response_bytes", &self.max_response_bytes)
            .field("user_agent", &self.user_agent)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing the HTTP source.
#[derive(Debug, Error)]
pub enum HttpSourceError {
    /// The HTTP client could not be created.
    #[error("http client build failed: {0}")]
    Client(String),
}

// ============================================================================
// SECTION: Source Implementation
// ============================================================================

/// Membership source backed by a blocking reqwest client.
pub struct GwsHttpSource {
    /// Source configuration, including limits and policy.
    config: GwsHttpConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl GwsHttpSource {
    /// Creates a new HTTP source with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpSourceError`] when the HTTP client cannot be created.
    pub fn new(config: GwsHttpConfig) -> Result<Self, HttpSourceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| HttpSourceError::Client(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Returns the source configuration.
    #[must_use]
    pub const fn config(&self) -> &GwsHttpConfig {
        &self.config
    }
}

impl MembershipSource for GwsHttpSource {
    fn get(&self, url: &str) -> Result<Option<String>, MembershipSourceError> {
        let url =
            Url::parse(url).map_err(|err| MembershipSourceError::InvalidUrl(err.to_string()))?;
        validate_url(&url, &self.config)?;

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }
        let mut response = match request.send() {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "group service request failed");
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                "group service returned non-success status"
            );
            return Ok(None);
        }

        let body = match read_response_limited(&mut response, self.config.max_response_bytes) {
            Ok(body) => body,
            Err(reason) => {
                tracing::warn!(url = %url, reason, "group service body rejected");
                return Ok(None);
            }
        };
        match String::from_utf8(body) {
            Ok(body) => Ok(Some(body)),
            Err(_) => {
                tracing::warn!(url = %url, "group service body is not utf-8");
                Ok(None)
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the URL scheme against policy.
fn validate_url(url: &Url, config: &GwsHttpConfig) -> Result<(), MembershipSourceError> {
    match url.scheme() {
        "https" => Ok(()),
        "http" if config.allow_http => Ok(()),
        scheme => {
            Err(MembershipSourceError::InvalidUrl(format!("unsupported url scheme: {scheme}")))
        }
    }
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, &'static str> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes).map_err(|_| "response size limit exceeds u64")?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err("response exceeds size limit");
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle.read_to_end(&mut buf).map_err(|_| "failed to read response")?;
    if buf.len() > max_bytes {
        return Err("response exceeds size limit");
    }
    if let Some(expected) = expected_len {
        let expected = usize::try_from(expected).map_err(|_| "invalid response length")?;
        if buf.len() < expected {
            return Err("response truncated");
        }
    }
    Ok(buf)
}
