//! Failure taxonomy for request execution.
//!
//! Every execution ends in a typed record or exactly one [`Failure`]:
//!
//! - [`Failure::Validation`] - a local check failed; nothing was sent
//! - [`Failure::Transport`] - no response could be obtained
//! - [`Failure::Remote`] - the server answered with a non-2xx status
//! - [`Failure::Decode`] - a 2xx body did not fit the declared record
//! - [`Failure::NotDone`] - an operation poller ran out of polls
//!
//! Nothing is retried. Callers branch on [`Failure::status_code`].
//!
//! # Example
//!
//! ```rust,ignore
//! use discovery_client::rest::Failure;
//!
//! match operations.get(name).execute().await {
//!     Ok(operation) => println!("done: {}", operation.is_done()),
//!     Err(Failure::Remote(e)) if e.code == 404 => println!("gone"),
//!     Err(Failure::Validation(e)) => println!("bad input: {e}"),
//!     Err(e) => println!("failed: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, InvalidHttpRequestError};

/// A local validation failure, detected before any network attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required parameter was not bound.
    #[error("Missing required parameter '{name}' for {method}")]
    MissingParameter {
        /// The method id.
        method: String,
        /// The parameter wire name.
        name: String,
    },

    /// A required parameter was bound to a blank value.
    #[error("Parameter '{name}' for {method} cannot be empty")]
    EmptyParameter {
        /// The method id.
        method: String,
        /// The parameter wire name.
        name: String,
    },

    /// A bound value does not match the parameter's declared pattern.
    #[error("Parameter '{name}' for {method} must match {pattern}, got '{value}'")]
    PatternMismatch {
        /// The method id.
        method: String,
        /// The parameter wire name.
        name: String,
        /// The rejected value.
        value: String,
        /// The declared pattern.
        pattern: String,
    },

    /// A parameter the method does not declare was bound.
    #[error("Unknown parameter '{name}' for {method}")]
    UnknownParameter {
        /// The method id.
        method: String,
        /// The parameter wire name.
        name: String,
    },

    /// Several values were bound to a non-repeated parameter.
    #[error("Parameter '{name}' for {method} does not accept multiple values")]
    NotRepeated {
        /// The method id.
        method: String,
        /// The parameter wire name.
        name: String,
    },

    /// The method requires a request body and none was supplied.
    #[error("{method} requires a request body")]
    MissingBody {
        /// The method id.
        method: String,
    },

    /// A body was supplied to a method that takes none.
    #[error("{method} does not accept a request body")]
    UnexpectedBody {
        /// The method id.
        method: String,
    },

    /// The request body could not be serialized.
    #[error("Failed to serialize request body for {method}: {reason}")]
    BodySerialization {
        /// The method id.
        method: String,
        /// The serializer's message.
        reason: String,
    },

    /// A resource does not expose the requested method.
    #[error("Resource '{resource}' has no method '{method}'")]
    UnknownMethod {
        /// The resource name.
        resource: String,
        /// The requested method name.
        method: String,
    },

    /// The assembled HTTP request failed its own checks.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

/// A non-2xx response decoded from the standard error envelope.
///
/// The envelope looks like:
///
/// ```json
/// {"error": {"code": 404, "message": "Not found", "status": "NOT_FOUND", "details": []}}
/// ```
///
/// `code` is always the transport's status code, even when the envelope
/// disagrees. `details` are kept verbatim.
///
/// # Example
///
/// ```rust
/// use discovery_client::clients::HttpResponse;
/// use discovery_client::rest::RemoteError;
/// use std::collections::HashMap;
///
/// let body = br#"{"error":{"code":404,"message":"Operation not found","status":"NOT_FOUND"}}"#;
/// let response = HttpResponse::new(404, HashMap::new(), body.to_vec());
///
/// let error = RemoteError::from_response(&response);
/// assert_eq!(error.code, 404);
/// assert_eq!(error.message, "Operation not found");
/// assert_eq!(error.status.as_deref(), Some("NOT_FOUND"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("HTTP {code}: {message}")]
pub struct RemoteError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// Canonical status name (e.g., `NOT_FOUND`), when the envelope has one.
    pub status: Option<String>,
    /// Opaque detail records from the envelope.
    pub details: Vec<Value>,
}

impl RemoteError {
    /// Longest raw body kept as a fallback message.
    const MAX_FALLBACK_LEN: usize = 1024;

    /// Decodes a failure from a non-2xx response.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let code = response.code;
        let body: Option<Value> = serde_json::from_slice(&response.body).ok();

        match body.as_ref().and_then(|b| b.get("error")) {
            Some(Value::Object(envelope)) => Self {
                code,
                message: envelope
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| Self::fallback_message(response), String::from),
                status: envelope
                    .get("status")
                    .and_then(Value::as_str)
                    .map(String::from),
                details: envelope
                    .get("details")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
            },
            Some(Value::String(error)) => Self {
                code,
                message: body
                    .as_ref()
                    .and_then(|b| b.get("error_description"))
                    .and_then(Value::as_str)
                    .unwrap_or(error)
                    .to_string(),
                status: Some(error.clone()),
                details: Vec::new(),
            },
            _ => Self {
                code,
                message: Self::fallback_message(response),
                status: None,
                details: Vec::new(),
            },
        }
    }

    fn fallback_message(response: &HttpResponse) -> String {
        let text = response.text();
        let text = text.trim();
        if !text.is_empty() {
            return text.chars().take(Self::MAX_FALLBACK_LEN).collect();
        }
        reqwest::StatusCode::from_u16(response.code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown error")
            .to_string()
    }
}

/// The outcome of a failed request execution.
#[derive(Debug, Error)]
pub enum Failure {
    /// Local validation failed; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transport could not obtain a response.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A 2xx body did not decode into the declared record.
    #[error("Failed to decode {type_name} from response body: {source}")]
    Decode {
        /// The record type being decoded.
        type_name: &'static str,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// An operation was still running after the allowed number of polls.
    #[error("Operation '{name}' not done after {polls} polls")]
    NotDone {
        /// The operation name.
        name: String,
        /// How many polls were issued.
        polls: u32,
    },
}

impl Failure {
    /// Returns the HTTP status code for remote failures.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns `true` if the failure happened before anything was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the remote error, if this is one.
    #[must_use]
    pub const fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(code: u16, body: &[u8]) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_envelope_is_decoded_verbatim() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "Invalid filter",
                "status": "INVALID_ARGUMENT",
                "details": [
                    {"@type": "type.googleapis.com/google.rpc.BadRequest", "fieldViolations": []}
                ]
            }
        });
        let error = RemoteError::from_response(&response(400, body.to_string().as_bytes()));

        assert_eq!(error.code, 400);
        assert_eq!(error.message, "Invalid filter");
        assert_eq!(error.status.as_deref(), Some("INVALID_ARGUMENT"));
        assert_eq!(error.details.len(), 1);
        assert_eq!(
            error.details[0]["@type"],
            "type.googleapis.com/google.rpc.BadRequest"
        );
    }

    #[test]
    fn test_status_code_comes_from_transport_not_envelope() {
        let body = json!({"error": {"code": 500, "message": "lying envelope"}});
        let error = RemoteError::from_response(&response(503, body.to_string().as_bytes()));
        assert_eq!(error.code, 503);
    }

    #[test]
    fn test_oauth_style_error_string() {
        let body = json!({"error": "invalid_grant", "error_description": "Token expired"});
        let error = RemoteError::from_response(&response(401, body.to_string().as_bytes()));
        assert_eq!(error.message, "Token expired");
        assert_eq!(error.status.as_deref(), Some("invalid_grant"));
    }

    #[test]
    fn test_non_json_body_falls_back_to_text() {
        let error = RemoteError::from_response(&response(502, b"<html>Bad Gateway</html>"));
        assert_eq!(error.code, 502);
        assert_eq!(error.message, "<html>Bad Gateway</html>");
        assert!(error.details.is_empty());
    }

    #[test]
    fn test_empty_body_falls_back_to_reason_phrase() {
        let error = RemoteError::from_response(&response(404, b""));
        assert_eq!(error.message, "Not Found");
        assert_eq!(error.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_failure_status_code() {
        let failure = Failure::from(RemoteError::from_response(&response(429, b"")));
        assert_eq!(failure.status_code(), Some(429));
        assert!(failure.remote().is_some());

        let failure = Failure::from(ValidationError::MissingBody {
            method: "svc.things.create".to_string(),
        });
        assert_eq!(failure.status_code(), None);
        assert!(failure.is_validation());
    }

    #[test]
    fn test_validation_messages() {
        let error = ValidationError::PatternMismatch {
            method: "checks.accounts.apps.operations.get".to_string(),
            name: "name".to_string(),
            value: "bad-name".to_string(),
            pattern: "^accounts/[^/]+$".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'name'"));
        assert!(message.contains("bad-name"));
        assert!(message.contains("^accounts/[^/]+$"));
    }
}
