//! Authentication slots and OAuth scopes.
//!
//! Token acquisition is not handled here. This module only models what a
//! service declares ([`Scopes`]) and where a caller-supplied key or token is
//! attached to requests ([`Credentials`]).
//!
//! # Example
//!
//! ```rust
//! use discovery_client::{AccessToken, ClientConfig, Credentials};
//!
//! let config = ClientConfig::builder()
//!     .credentials(Credentials::BearerToken(AccessToken::new("ya29.token").unwrap()))
//!     .build()
//!     .unwrap();
//! ```

mod credentials;
mod scopes;

pub use credentials::{CredentialSlot, Credentials, CREDENTIAL_PARAMETERS};
pub use scopes::Scopes;
