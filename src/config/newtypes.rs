//! Validated newtype wrappers for configuration values.
//!
//! Credentials and URLs are checked once on construction so that the request
//! path never has to second-guess them.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API key, sent in the `key` query parameter.
///
/// # Example
///
/// ```rust
/// use discovery_client::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth 2.0 access token.
///
/// Acquiring the token is the caller's business; this type only carries it.
/// The `Debug` implementation masks the value so tokens never reach logs.
///
/// # Example
///
/// ```rust
/// use discovery_client::AccessToken;
///
/// let token = AccessToken::new("ya29.secret").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated API root URL such as `https://checks.googleapis.com/`.
///
/// The URL must be absolute with an `http` or `https` scheme and a host.
/// A trailing slash is always present so that relative method paths can be
/// appended directly.
///
/// # Example
///
/// ```rust
/// use discovery_client::RootUrl;
///
/// let url = RootUrl::new("http://localhost:8080").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080/");
/// assert_eq!(url.host_name(), Some("localhost"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootUrl(url::Url);

impl RootUrl {
    /// Creates a new validated root URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRootUrl`] if the URL cannot be parsed,
    /// is not http(s), has no host, or carries a query or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();
        let invalid = || ConfigError::InvalidRootUrl { url: raw.clone() };

        let mut parsed = url::Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(invalid());
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid());
        }

        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self(parsed))
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl AsRef<str> for RootUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RootUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for RootUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for RootUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_access_token_rejects_empty_string() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("ya29.super-secret").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_root_url_appends_trailing_slash() {
        let url = RootUrl::new("https://checks.googleapis.com").unwrap();
        assert_eq!(url.as_ref(), "https://checks.googleapis.com/");

        let url = RootUrl::new("http://127.0.0.1:9000/proxy").unwrap();
        assert_eq!(url.as_ref(), "http://127.0.0.1:9000/proxy/");
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("127.0.0.1"));
    }

    #[test]
    fn test_root_url_rejects_invalid() {
        assert!(RootUrl::new("checks.googleapis.com").is_err());
        assert!(RootUrl::new("ftp://example.com/").is_err());
        assert!(RootUrl::new("https://example.com/?x=1").is_err());
        assert!(RootUrl::new("https://example.com/#frag").is_err());
        assert!(RootUrl::new("").is_err());
    }

    #[test]
    fn test_root_url_deserializes_through_validation() {
        let url: RootUrl = serde_json::from_str(r#""https://example.com""#).unwrap();
        assert_eq!(url.as_ref(), "https://example.com/");

        let bad: Result<RootUrl, _> = serde_json::from_str(r#""nope""#);
        assert!(bad.is_err());
    }
}
