//! HTTP response types.
//!
//! [`HttpResponse`] is what a [`Transport`](crate::clients::Transport) hands
//! back: a status code, lower-cased headers, and the raw body bytes.

use std::borrow::Cow;
use std::collections::HashMap;

/// A raw response from the transport.
///
/// # Example
///
/// ```rust
/// use discovery_client::clients::HttpResponse;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("etag".to_string(), vec!["\"v1\"".to_string()]);
///
/// let response = HttpResponse::new(200, headers, br#"{"done":true}"#.to_vec());
/// assert!(response.is_ok());
/// assert_eq!(response.etag(), Some("\"v1\""));
/// assert_eq!(response.text(), r#"{"done":true}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers with lower-cased names.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new response, normalizing header names to lower case.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_ascii_lowercase(), values))
            .collect();
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `ETag` header, if present.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.header("etag")
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns `true` if the body is empty or whitespace only.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_boundaries() {
        let response = |code| HttpResponse::new(code, HashMap::new(), Vec::new());
        assert!(!response(199).is_ok());
        assert!(response(200).is_ok());
        assert!(response(204).is_ok());
        assert!(!response(300).is_ok());
        assert!(!response(404).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("ETag".to_string(), vec!["W/\"abc\"".to_string()]);
        let response = HttpResponse::new(200, headers, Vec::new());

        assert_eq!(response.header("etag"), Some("W/\"abc\""));
        assert_eq!(response.header("ETAG"), Some("W/\"abc\""));
        assert_eq!(response.etag(), Some("W/\"abc\""));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_empty_body_detection() {
        assert!(HttpResponse::new(204, HashMap::new(), Vec::new()).is_empty_body());
        assert!(HttpResponse::new(200, HashMap::new(), b" \n".to_vec()).is_empty_body());
        assert!(!HttpResponse::new(200, HashMap::new(), b"{}".to_vec()).is_empty_body());
    }

    #[test]
    fn test_text_is_lossy() {
        let response = HttpResponse::new(500, HashMap::new(), vec![0x66, 0x6f, 0xff]);
        assert_eq!(response.text(), "fo\u{fffd}");
    }
}
