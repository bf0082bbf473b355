//! Response wrapper for executed requests.
//!
//! This module provides [`Response<T>`], which pairs a decoded record with
//! the status code and headers it arrived with. The wrapper implements
//! `Deref` for ergonomic access to the inner record.
//!
//! # Deref Pattern
//!
//! ```rust,ignore
//! let response = operations.list(parent).execute_with_response().await?;
//!
//! // Field access via Deref
//! for operation in &response.operations {
//!     println!("{}", operation.name);
//! }
//!
//! // Metadata
//! println!("status {}", response.code());
//!
//! // Take ownership of the record
//! let page = response.into_inner();
//! ```

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// A decoded record together with its HTTP metadata.
///
/// # Example
///
/// ```rust
/// use discovery_client::rest::{Empty, Response};
/// use std::collections::HashMap;
///
/// let response = Response::new(Empty::default(), 200, HashMap::new());
/// assert_eq!(response.code(), 200);
/// assert!(response.extra.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    code: u16,
    headers: HashMap<String, Vec<String>>,
}

impl<T> Response<T> {
    /// Creates a response from its parts. Header names are expected in lower case.
    #[must_use]
    pub const fn new(data: T, code: u16, headers: HashMap<String, Vec<String>>) -> Self {
        Self {
            data,
            code,
            headers,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Returns all response headers, keyed by lower-case name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Consumes the wrapper and returns the record.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Transforms the record while keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            data: f(self.data),
            code: self.code,
            headers: self.headers,
        }
    }
}

impl<T> Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for Response<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> HashMap<String, Vec<String>> {
        let mut headers = HashMap::new();
        headers.insert("etag".to_string(), vec!["\"v2\"".to_string()]);
        headers
    }

    #[test]
    fn test_deref_to_inner() {
        let response = Response::new(vec![1, 2, 3], 200, HashMap::new());
        assert_eq!(response.len(), 3);
        assert_eq!(response[0], 1);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = Response::new((), 200, headers());
        assert_eq!(response.header("ETag"), Some("\"v2\""));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let response = Response::new(2, 201, headers()).map(|n| n * 10);
        assert_eq!(*response, 20);
        assert_eq!(response.code(), 201);
        assert!(response.header("etag").is_some());
    }

    #[test]
    fn test_into_inner() {
        let response = Response::new("data".to_string(), 200, HashMap::new());
        assert_eq!(response.into_inner(), "data");
    }
}
