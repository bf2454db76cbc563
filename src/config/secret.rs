//! Secret string wrapper for the API credential.
//!
//! The access token travels in every request's `x-api-key` header, so the
//! configuration holds it in a type whose `Debug` and `Display` output is
//! redacted.

use std::fmt;

/// A wrapper for sensitive strings that redacts the value in Debug/Display output.
///
/// # Example
///
/// ```
/// use anthropic_http::config::SecretString;
///
/// let secret = SecretString::new("sk-ant-api-key-123");
/// assert_eq!(format!("{:?}", secret), "<REDACTED>");
/// assert_eq!(secret.expose(), "sk-ant-api-key-123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new `SecretString` from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the underlying secret value.
    ///
    /// Only the header builder should need this.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_debug_redacted() {
        let secret = SecretString::new("sk-ant-super-secret");
        let debug = format!("{secret:?}");
        assert_eq!(debug, "<REDACTED>");
        assert!(!debug.contains("sk-ant"));
    }

    #[test]
    fn test_secret_string_display_redacted() {
        let secret = SecretString::new("sk-ant-super-secret");
        assert_eq!(format!("{secret}"), "<REDACTED>");
    }

    #[test]
    fn test_secret_string_conversions() {
        let from_str: SecretString = "key".into();
        let from_string: SecretString = String::from("key").into();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str.expose(), "key");
    }

    #[test]
    fn test_secret_string_is_empty() {
        assert!(SecretString::new("").is_empty());
        assert!(!SecretString::new("k").is_empty());
    }
}
