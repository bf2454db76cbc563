//! Shared configuration handle.
//!
//! Replaces a process-wide singleton with an explicit handle: clients hold a
//! clone, callers mutate it through [`SharedConfiguration::configure`], and
//! each request reads a snapshot with [`SharedConfiguration::get`].

use std::sync::{Arc, PoisonError, RwLock};

use super::Configuration;

/// Cloneable handle to a [`Configuration`] shared by one or more clients.
#[derive(Debug, Clone, Default)]
pub struct SharedConfiguration {
    inner: Arc<RwLock<Configuration>>,
}

impl SharedConfiguration {
    /// Create a handle holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of the current configuration.
    #[must_use]
    pub fn get(&self) -> Configuration {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mutate the live configuration in place.
    pub fn configure<F>(&self, mutator: F)
    where
        F: FnOnce(&mut Configuration),
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        mutator(&mut guard);
    }
}

impl From<Configuration> for SharedConfiguration {
    fn from(config: Configuration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_holds_defaults() {
        let shared = SharedConfiguration::new();
        assert_eq!(shared.get(), Configuration::default());
    }

    #[test]
    fn test_configure_mutates_in_place() {
        let shared = SharedConfiguration::new();
        shared.configure(|c| {
            c.access_token = Some("key".into());
            c.request_timeout = Duration::from_secs(10);
        });

        let config = shared.get();
        assert!(config.access_token().is_ok());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedConfiguration::new();
        let other = shared.clone();
        other.configure(|c| c.api_version = "v2".to_string());
        assert_eq!(shared.get().api_version, "v2");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let shared = SharedConfiguration::new();
        let before = shared.get();
        shared.configure(|c| c.uri_base = "http://localhost/".to_string());
        assert_eq!(before.uri_base, "https://api.anthropic.com/");
    }

    #[test]
    fn test_from_configuration() {
        let shared = SharedConfiguration::from(Configuration::new().with_access_token("k"));
        assert_eq!(shared.get().access_token().map(|t| t.expose().to_string()).ok(), Some("k".to_string()));
    }
}
