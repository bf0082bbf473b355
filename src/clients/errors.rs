//! Transport-level error types.
//!
//! A transport either produces an [`HttpResponse`](crate::clients::HttpResponse)
//! (whatever its status code) or fails with an [`HttpError`]. Turning a
//! non-2xx response into a structured failure is the request executor's job,
//! not the transport's.
//!
//! # Example
//!
//! ```rust,ignore
//! use discovery_client::clients::{HttpError, Transport};
//!
//! match transport.send(request).await {
//!     Ok(response) => println!("HTTP {}", response.code),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(e) if e.is_timeout() => println!("Timed out: {e}"),
//!     Err(e) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation before sending.
///
/// # Example
///
/// ```rust
/// use discovery_client::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::BodyNotAllowed {
///     method: "GET".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot send a body with GET.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not one of the supported methods.
    #[error("Invalid Http method {method}.")]
    InvalidMethod {
        /// The invalid method that was provided.
        method: String,
    },

    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A body was attached to a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method that forbids a body.
        method: String,
    },

    /// The request URL is not absolute.
    #[error("Invalid request URL '{url}'.")]
    InvalidUrl {
        /// The offending URL.
        url: String,
    },
}

/// Unified error type for transport failures.
///
/// Non-2xx responses are not errors at this layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network, connection or timeout error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` if the transport gave up because of a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }

    /// Returns `true` if the connection could not be established.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_connect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error_missing_body_type() {
        let error = InvalidHttpRequestError::MissingBodyType;
        assert_eq!(
            error.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }

    #[test]
    fn test_invalid_request_error_invalid_method() {
        let error = InvalidHttpRequestError::InvalidMethod {
            method: "BREW".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid Http method BREW.");
    }

    #[test]
    fn test_http_error_wraps_invalid_request_transparently() {
        let error = HttpError::from(InvalidHttpRequestError::InvalidUrl {
            url: "relative/path".to_string(),
        });
        assert_eq!(error.to_string(), "Invalid request URL 'relative/path'.");
        assert!(!error.is_timeout());
        assert!(!error.is_connect());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::MissingBodyType;
        let _ = invalid;
    }
}
