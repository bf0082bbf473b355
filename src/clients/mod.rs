//! HTTP transport layer.
//!
//! This module provides the types exchanged with the network: an assembled
//! [`HttpRequest`], the raw [`HttpResponse`], the [`Transport`] trait that
//! carries one to the other, and [`HttpClient`], the default `reqwest`
//! implementation.
//!
//! # Overview
//!
//! - [`Transport`]: the seam services send requests through
//! - [`HttpClient`]: `reqwest`-based transport
//! - [`HttpRequest`]: method, absolute URL, query pairs, headers, JSON body
//! - [`HttpResponse`]: status code, headers and body bytes
//! - [`HttpMethod`]: GET, POST, PUT, PATCH, DELETE
//! - [`HttpError`]: a response could not be obtained
//!
//! # Retry Behavior
//!
//! None. A transport returns exactly one response per request; callers
//! decide retry policy from the status code.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::Transport;
