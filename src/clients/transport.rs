//! The transport seam.
//!
//! Services never talk to the network directly; they hand a fully assembled
//! [`HttpRequest`] to a [`Transport`]. Retry, pooling, timeouts and
//! cancellation all live behind this trait.

use async_trait::async_trait;

use crate::clients::{HttpError, HttpRequest, HttpResponse};

/// Sends assembled requests and returns raw responses.
///
/// Implementations must return `Ok` for every response they receive,
/// including 4xx and 5xx; only failures to obtain a response are errors.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use discovery_client::clients::{HttpError, HttpRequest, HttpResponse, Transport};
/// use std::collections::HashMap;
///
/// #[derive(Debug)]
/// struct AlwaysNotFound;
///
/// #[async_trait]
/// impl Transport for AlwaysNotFound {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(404, HashMap::new(), Vec::new()))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends a request and returns the response, whatever its status code.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response could be obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
