//! Error types for the Anthropic HTTP client.
//!
//! This module defines a small error hierarchy:
//! - [`Error`]: Top-level error returned by every request operation
//! - [`ConfigError`]: Configuration errors, raised before any network I/O
//!
//! Transport failures from `reqwest` are carried unmodified in
//! [`Error::Transport`] so callers can inspect timeouts and connection
//! errors directly.

use thiserror::Error;

/// Top-level client error.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network, timeout or connection failure from the HTTP layer.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded as JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Request parameters cannot be sent to the chosen endpoint.
    #[error("Invalid parameters: {reason}")]
    InvalidParameters {
        /// Why they were rejected.
        reason: String,
    },

    /// The API answered with a non-2xx status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error.message` of the body, or the raw body.
        message: String,
    },

    /// The stream delivered an `error:` event.
    #[error("Stream error: {payload}")]
    Stream {
        /// The event payload as JSON text.
        payload: String,
    },
}

impl Error {
    /// Returns true if this error was raised before any request was sent.
    #[must_use]
    pub const fn is_pre_network(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidHeader { .. } | Self::InvalidParameters { .. }
        )
    }

    /// Returns true if the underlying transport reported a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No access token was configured before a request was built.
    #[error(
        "Anthropic access token missing! Set ANTHROPIC_API_KEY or call Configuration::with_access_token"
    )]
    MissingAccessToken,

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Error: Send, Sync, std::error::Error);
    assert_impl_all!(ConfigError: Send, Sync, std::error::Error, Clone);

    #[test]
    fn test_error_display_missing_token() {
        let err = Error::Config(ConfigError::MissingAccessToken);
        assert!(err.to_string().starts_with("Configuration error: Anthropic access token missing!"));
    }

    #[test]
    fn test_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            var: "ANTHROPIC_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be a positive integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for ANTHROPIC_REQUEST_TIMEOUT_SECS: must be a positive integer"
        );
    }

    #[test]
    fn test_error_display_invalid_header() {
        let err = Error::InvalidHeader {
            name: "x bad".to_string(),
            reason: "invalid HTTP header name".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid header x bad: invalid HTTP header name");
    }

    #[test]
    fn test_error_display_api() {
        let err = Error::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        };
        assert_eq!(err.to_string(), "API error 401: invalid x-api-key");
        assert!(!err.is_pre_network());
    }

    #[test]
    fn test_error_display_stream() {
        let err = Error::Stream {
            payload: r#"{"type":"overloaded_error"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"Stream error: {"type":"overloaded_error"}"#);
    }

    #[test]
    fn test_invalid_parameters_is_pre_network() {
        let err = Error::InvalidParameters {
            reason: "expected a JSON object".to_string(),
        };
        assert!(err.is_pre_network());
        assert_eq!(err.to_string(), "Invalid parameters: expected a JSON object");
    }

    #[test]
    fn test_error_from_config_error() {
        let err: Error = ConfigError::MissingAccessToken.into();
        assert!(matches!(err, Error::Config(ConfigError::MissingAccessToken)));
        assert!(err.is_pre_network());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_error_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Parse(_)));
        assert!(!err.is_pre_network());
        assert!(err.to_string().starts_with("Parse error:"));
    }

    #[test]
    fn test_config_error_clone_eq() {
        let err = ConfigError::MissingAccessToken;
        assert_eq!(err.clone(), err);
    }
}
