//! Error types for client configuration and service construction.
//!
//! Everything that can go wrong before a single request is assembled lives
//! here: invalid credentials, a malformed root URL, or a service descriptor
//! whose methods contradict their own parameter declarations.
//!
//! # Example
//!
//! ```rust
//! use discovery_client::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client or building a service.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid API key.")]
    EmptyApiKey,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid OAuth 2.0 access token.")]
    EmptyAccessToken,

    /// Root URL is invalid.
    #[error("Invalid root URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://example.googleapis.com/').")]
    InvalidRootUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A parameter pattern is not a valid regular expression.
    #[error("Invalid pattern '{pattern}' for parameter '{parameter}': {reason}")]
    InvalidPattern {
        /// The parameter that declared the pattern.
        parameter: String,
        /// The offending pattern.
        pattern: String,
        /// Why the pattern failed to compile.
        reason: String,
    },

    /// A path template could not be parsed.
    #[error("Invalid path template '{template}': {reason}")]
    InvalidPathTemplate {
        /// The offending template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A method descriptor contradicts itself.
    #[error("Malformed method '{method}': {reason}")]
    MalformedMethod {
        /// The method id (e.g., `checks.accounts.apps.operations.get`).
        method: String,
        /// What is wrong with the declaration.
        reason: String,
    },

    /// A resource, method or parameter name appears twice under the same parent.
    #[error("Duplicate {kind} '{name}' in resource '{parent}'")]
    DuplicateName {
        /// One of "resource", "method" or "parameter".
        kind: &'static str,
        /// The duplicated name.
        name: String,
        /// The parent resource, or the service name at the root.
        parent: String,
    },

    /// A discovery document could not be parsed.
    #[error("Invalid discovery document: {reason}")]
    InvalidDiscoveryDocument {
        /// The parse failure.
        reason: String,
    },

    /// The HTTP transport could not be initialized.
    #[error("Failed to initialize HTTP transport: {reason}")]
    TransportInit {
        /// The underlying failure.
        reason: String,
    },
}
