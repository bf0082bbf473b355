//! Client configuration.
//!
//! This module provides the configuration shared by every request a
//! [`Service`](crate::rest::Service) issues.
//!
//! # Overview
//!
//! - [`ClientConfig`]: credentials, root URL override, user agent, timeout
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`ApiKey`]: a validated API key newtype
//! - [`AccessToken`]: a validated access token newtype with masked debug output
//! - [`RootUrl`]: a validated API root URL
//!
//! # Example
//!
//! ```rust
//! use discovery_client::{ClientConfig, ApiKey, Credentials};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .credentials(Credentials::ApiKey(ApiKey::new("my-api-key").unwrap()))
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert!(config.credentials().is_some());
//! ```

mod newtypes;

use std::time::Duration;

pub use newtypes::{AccessToken, ApiKey, RootUrl};

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Configuration for a discovery-based API client.
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`; a single configuration can
/// back any number of services.
///
/// # Example
///
/// ```rust
/// use discovery_client::{ClientConfig, RootUrl};
///
/// let config = ClientConfig::builder()
///     .root_url(RootUrl::new("http://localhost:8080").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.root_url().unwrap().as_ref(), "http://localhost:8080/");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    credentials: Option<Credentials>,
    root_url: Option<RootUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    quota_user: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the credentials attached to outgoing requests, if any.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the root URL override, if configured.
    ///
    /// When set, it replaces the root URL declared by the service descriptor.
    #[must_use]
    pub const fn root_url(&self) -> Option<&RootUrl> {
        self.root_url.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout handed to the transport.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the default `quotaUser` sent with every request, if any.
    #[must_use]
    pub fn quota_user(&self) -> Option<&str> {
        self.quota_user.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Every field is optional. An unconfigured client sends anonymous requests
/// to the root URL declared by the service.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    credentials: Option<Credentials>,
    root_url: Option<RootUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    quota_user: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the credentials attached to every request.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Overrides the service's root URL (useful for proxies and test servers).
    #[must_use]
    pub fn root_url(mut self, root_url: RootUrl) -> Self {
        self.root_url = Some(root_url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout enforced by the transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a default `quotaUser` for every request.
    #[must_use]
    pub fn quota_user(mut self, quota_user: impl Into<String>) -> Self {
        self.quota_user = Some(quota_user.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a configured
    /// `quota_user` or `user_agent_prefix` is blank.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        if self.quota_user.as_deref().is_some_and(|q| q.trim().is_empty()) {
            return Err(ConfigError::MissingRequiredField {
                field: "quota_user",
            });
        }
        if self
            .user_agent_prefix
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(ConfigError::MissingRequiredField {
                field: "user_agent_prefix",
            });
        }

        Ok(ClientConfig {
            credentials: self.credentials,
            root_url: self.root_url,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            quota_user: self.quota_user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder().build().unwrap();

        assert!(config.credentials().is_none());
        assert!(config.root_url().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
        assert!(config.quota_user().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .credentials(Credentials::BearerToken(AccessToken::new("tok").unwrap()))
            .root_url(RootUrl::new("https://proxy.example.com").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .timeout(Duration::from_secs(5))
            .quota_user("user-42")
            .build()
            .unwrap();

        assert!(matches!(
            config.credentials(),
            Some(Credentials::BearerToken(_))
        ));
        assert_eq!(
            config.root_url().map(AsRef::as_ref),
            Some("https://proxy.example.com/")
        );
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.quota_user(), Some("user-42"));
    }

    #[test]
    fn test_builder_rejects_blank_quota_user() {
        let result = ClientConfig::builder().quota_user("  ").build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "quota_user"
            })
        ));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = ClientConfig::builder()
            .credentials(Credentials::BearerToken(
                AccessToken::new("ya29.leaky").unwrap(),
            ))
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ClientConfig"));
        assert!(!debug_str.contains("ya29.leaky"));
    }
}
