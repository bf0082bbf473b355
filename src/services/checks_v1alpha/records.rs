//! Records exchanged by the Checks API operations surface.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{impl_record, Nullable, Operation};

/// One page of operations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOperationsResponse {
    /// Operations on this page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,
    /// Token for the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    /// Resources the server could not reach while listing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreachable: Vec<String>,
    /// The version tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Fields a newer server might add.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListOperationsResponse {
    /// Returns `true` if another page follows.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_page_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

impl_record!(ListOperationsResponse);

/// Body of `operations.cancel`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelOperationRequest {
    /// The version tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Fields a newer server might accept.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_record!(CancelOperationRequest);

/// Body of `operations.wait`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitOperationRequest {
    /// Longest time to wait, as a duration string such as `"30s"`. Absent
    /// leaves the choice to the server.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub timeout: Nullable<String>,
    /// The version tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Fields a newer server might accept.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_record!(WaitOperationRequest);

impl WaitOperationRequest {
    /// Waits at most `seconds` seconds.
    #[must_use]
    pub fn with_timeout_secs(seconds: u64) -> Self {
        Self {
            timeout: Nullable::Value(format!("{seconds}s")),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Record;
    use serde_json::json;

    #[test]
    fn test_list_response_decodes_operations_and_unknown_fields() {
        let page: ListOperationsResponse = serde_json::from_value(json!({
            "operations": [
                {"name": "accounts/1/apps/2/operations/a"},
                {"name": "accounts/1/apps/2/operations/b", "done": true, "response": {}}
            ],
            "nextPageToken": "p2",
            "totalSize": 40
        }))
        .unwrap();

        assert_eq!(page.operations.len(), 2);
        assert!(page.operations[1].is_done());
        assert!(page.has_next_page());
        assert_eq!(page.extra()["totalSize"], 40);
    }

    #[test]
    fn test_last_page() {
        let page: ListOperationsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!page.has_next_page());
        assert!(page.operations.is_empty());
    }

    #[test]
    fn test_request_bodies_keep_version_tag() {
        let cancel: CancelOperationRequest =
            serde_json::from_str(r#"{"etag": "v1", "reason": "user"}"#).unwrap();
        assert_eq!(cancel.etag(), Some("v1"));
        assert_eq!(cancel.extra().len(), 1);
        assert_eq!(
            serde_json::to_value(&cancel).unwrap(),
            json!({"etag": "v1", "reason": "user"})
        );

        let wait: WaitOperationRequest =
            serde_json::from_str(r#"{"timeout": "5s", "etag": "v2"}"#).unwrap();
        assert_eq!(wait.etag(), Some("v2"));
        assert!(wait.extra().is_empty());
        assert_eq!(
            serde_json::to_value(&wait).unwrap(),
            json!({"timeout": "5s", "etag": "v2"})
        );
    }

    #[test]
    fn test_wait_request_encoding() {
        assert_eq!(
            serde_json::to_value(WaitOperationRequest::default()).unwrap(),
            json!({})
        );
        assert_eq!(
            serde_json::to_value(WaitOperationRequest::with_timeout_secs(30)).unwrap(),
            json!({"timeout": "30s"})
        );
        assert_eq!(
            serde_json::to_value(CancelOperationRequest::default()).unwrap(),
            json!({})
        );
    }
}
