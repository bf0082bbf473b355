//! Credential slots for outgoing requests.
//!
//! How a token is obtained is outside this crate. [`Credentials`] only
//! decides where an already-acquired key or token is placed on the wire.

use crate::config::{AccessToken, ApiKey};

/// Where a credential is attached to an outgoing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialSlot {
    /// A query parameter with the given wire name (`key`, `access_token`, `oauth_token`).
    Query(&'static str),
    /// The `Authorization: Bearer <token>` header.
    AuthorizationHeader,
}

/// Query parameters that carry a key or token.
pub const CREDENTIAL_PARAMETERS: &[&str] = &["key", "access_token", "oauth_token"];

/// A key or token attached to every request issued by a service.
///
/// # Example
///
/// ```rust
/// use discovery_client::{ApiKey, Credentials};
/// use discovery_client::auth::CredentialSlot;
///
/// let credentials = Credentials::ApiKey(ApiKey::new("AIza-test").unwrap());
/// assert_eq!(credentials.slot(), CredentialSlot::Query("key"));
/// assert_eq!(credentials.value(), "AIza-test");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// API key sent as the `key` query parameter.
    ApiKey(ApiKey),
    /// Access token sent in the `Authorization` header.
    BearerToken(AccessToken),
    /// Access token sent as the `access_token` query parameter.
    AccessTokenParam(AccessToken),
    /// Access token sent as the legacy `oauth_token` query parameter.
    OAuthTokenParam(AccessToken),
}

impl Credentials {
    /// Returns the slot this credential occupies.
    #[must_use]
    pub const fn slot(&self) -> CredentialSlot {
        match self {
            Self::ApiKey(_) => CredentialSlot::Query("key"),
            Self::BearerToken(_) => CredentialSlot::AuthorizationHeader,
            Self::AccessTokenParam(_) => CredentialSlot::Query("access_token"),
            Self::OAuthTokenParam(_) => CredentialSlot::Query("oauth_token"),
        }
    }

    /// Returns the raw key or token.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::ApiKey(key) => key.as_ref(),
            Self::BearerToken(token)
            | Self::AccessTokenParam(token)
            | Self::OAuthTokenParam(token) => token.as_ref(),
        }
    }

    /// Returns the `Authorization` header value for header-borne credentials.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        match self {
            Self::BearerToken(token) => Some(format!("Bearer {}", token.as_ref())),
            _ => None,
        }
    }
}
