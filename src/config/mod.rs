//! Client configuration.
//!
//! This module handles:
//! - Default values for the Anthropic endpoint and protocol version
//! - Environment variable loading
//! - Configuration validation
//! - A shared, mutable handle read by every request
//! - Secure credential storage via [`SecretString`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use anthropic_http::config::{Configuration, SharedConfiguration};
//!
//! let shared = SharedConfiguration::new();
//! shared.configure(|config| {
//!     config.access_token = Some("sk-ant-example-key".into());
//!     config.request_timeout = Duration::from_secs(30);
//! });
//!
//! let snapshot: Configuration = shared.get();
//! assert_eq!(snapshot.request_timeout, Duration::from_secs(30));
//!
//! // The credential is protected from accidental logging
//! let debug = format!("{:?}", snapshot);
//! assert!(debug.contains("<REDACTED>"));
//! assert!(!debug.contains("sk-ant-example-key"));
//! ```

mod secret;
mod shared;
mod validation;

pub use secret::SecretString;
pub use shared::SharedConfiguration;
pub use validation::{validate_config, MAX_REQUEST_TIMEOUT, MIN_REQUEST_TIMEOUT};

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Default base URI for the Anthropic API.
pub const DEFAULT_URI_BASE: &str = "https://api.anthropic.com/";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default `Anthropic-Version` protocol header value.
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Client configuration.
///
/// Fields are public so a [`SharedConfiguration::configure`] callback can set
/// them in place. The credential is optional here and only checked when a
/// request is built, see [`Configuration::access_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Base URI, joined verbatim with `api_version` and the request path.
    pub uri_base: String,
    /// API version path segment (e.g. `v1`).
    pub api_version: String,
    /// Value sent in the `Anthropic-Version` header.
    pub anthropic_version: String,
    /// API credential sent as `x-api-key`.
    pub access_token: Option<SecretString>,
    /// Organization sent as `anthropic-organization` when present.
    pub organization_id: Option<String>,
    /// Headers merged over the defaults on every request.
    pub extra_headers: BTreeMap<String, String>,
    /// Per-request timeout enforced by the transport.
    pub request_timeout: Duration,
}

impl Configuration {
    /// Create a configuration with defaults and no credential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `ANTHROPIC_API_KEY`: credential (default: unset, checked at request time)
    /// - `ANTHROPIC_URI_BASE`: base URI (default: `https://api.anthropic.com/`)
    /// - `ANTHROPIC_API_VERSION`: path segment (default: `v1`)
    /// - `ANTHROPIC_VERSION`: protocol header (default: `2023-06-01`)
    /// - `ANTHROPIC_REQUEST_TIMEOUT_SECS`: timeout (default: `120`)
    /// - `ANTHROPIC_ORGANIZATION_ID`: organization (default: unset)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse or the
    /// result fails [`validate_config`].
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let timeout_secs =
            parse_env_u64("ANTHROPIC_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let config = Self {
            uri_base: env_or("ANTHROPIC_URI_BASE", DEFAULT_URI_BASE),
            api_version: env_or("ANTHROPIC_API_VERSION", DEFAULT_API_VERSION),
            anthropic_version: env_or("ANTHROPIC_VERSION", DEFAULT_ANTHROPIC_VERSION),
            access_token: std::env::var("ANTHROPIC_API_KEY").ok().map(SecretString::new),
            organization_id: std::env::var("ANTHROPIC_ORGANIZATION_ID").ok(),
            extra_headers: BTreeMap::new(),
            request_timeout: Duration::from_secs(timeout_secs),
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Validate the configuration and require a credential up front.
    ///
    /// Use this when a missing key should fail at startup rather than on the
    /// first request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAccessToken`] if no credential is set, or
    /// any error from [`validate_config`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.access_token()?;
        validate_config(&self)?;
        Ok(self)
    }

    /// Return the stored credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAccessToken`] if none was ever set.
    pub fn access_token(&self) -> Result<&SecretString, ConfigError> {
        self.access_token
            .as_ref()
            .ok_or(ConfigError::MissingAccessToken)
    }

    /// Full request URI: `uri_base + api_version + path`, concatenated verbatim.
    #[must_use]
    pub fn uri(&self, path: &str) -> String {
        format!("{}{}{}", self.uri_base, self.api_version, path)
    }

    /// Set the credential.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<SecretString>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the base URI.
    #[must_use]
    pub fn with_uri_base(mut self, uri_base: impl Into<String>) -> Self {
        self.uri_base = uri_base.into();
        self
    }

    /// Set the API version path segment.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the `Anthropic-Version` header value.
    #[must_use]
    pub fn with_anthropic_version(mut self, anthropic_version: impl Into<String>) -> Self {
        self.anthropic_version = anthropic_version.into();
        self
    }

    /// Set the organization id.
    #[must_use]
    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Add an extra header, replacing any previous value for the same name.
    #[must_use]
    pub fn with_extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            uri_base: DEFAULT_URI_BASE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
            access_token: None,
            organization_id: None,
            extra_headers: BTreeMap::new(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
