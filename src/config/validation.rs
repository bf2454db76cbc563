//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use std::time::Duration;

use super::Configuration;
use crate::error::ConfigError;

/// Minimum allowed request timeout (1 second).
pub const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Maximum allowed request timeout (10 minutes).
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Validate configuration values.
///
/// A missing credential is not an error here; it is checked when a request
/// is built.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if:
/// - `ANTHROPIC_API_KEY` is set but empty
/// - `ANTHROPIC_URI_BASE` is empty or not an http(s) URI
/// - `ANTHROPIC_REQUEST_TIMEOUT_SECS` is outside 1..=600 seconds
pub fn validate_config(config: &Configuration) -> Result<(), ConfigError> {
    if config.access_token.as_ref().is_some_and(super::SecretString::is_empty) {
        return Err(ConfigError::InvalidValue {
            var: "ANTHROPIC_API_KEY".into(),
            reason: "must not be empty".into(),
        });
    }

    if !(config.uri_base.starts_with("http://") || config.uri_base.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            var: "ANTHROPIC_URI_BASE".into(),
            reason: "must start with http:// or https://".into(),
        });
    }

    if config.request_timeout < MIN_REQUEST_TIMEOUT || config.request_timeout > MAX_REQUEST_TIMEOUT
    {
        return Err(ConfigError::InvalidValue {
            var: "ANTHROPIC_REQUEST_TIMEOUT_SECS".into(),
            reason: format!(
                "must be between {} and {} seconds",
                MIN_REQUEST_TIMEOUT.as_secs(),
                MAX_REQUEST_TIMEOUT.as_secs()
            ),
        });
    }

    Ok(())
}
