//! Integration tests for the Checks operations client.
//!
//! These tests run requests end to end against a mock server and verify
//! URL assembly, local validation, credential placement, response decoding
//! and the failure taxonomy.

use discovery_client::rest::{Empty, Failure, OperationState, Record, ValidationError};
use discovery_client::services::checks_v1alpha::{CancelOperationRequest, Checks};
use discovery_client::{AccessToken, ApiKey, ClientConfig, Credentials, RootUrl};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OPERATION: &str = "accounts/123/apps/456/operations/789";
const OPERATION_PATH: &str = "/v1alpha/accounts/123/apps/456/operations/789";

/// Creates a client pointed at the mock server.
fn checks_for(server: &MockServer, credentials: Option<Credentials>) -> Checks {
    let mut builder = ClientConfig::builder().root_url(RootUrl::new(server.uri()).unwrap());
    if let Some(credentials) = credentials {
        builder = builder.credentials(credentials);
    }
    Checks::new(builder.build().unwrap()).unwrap()
}

// ============================================================================
// Successful Calls
// ============================================================================

#[tokio::test]
async fn test_get_operation_hits_expected_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "metadata": {"@type": "type.googleapis.com/Progress", "percent": 40}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let operation = checks
        .accounts()
        .apps()
        .operations()
        .get(OPERATION)
        .execute()
        .await
        .unwrap();

    assert_eq!(operation.name, OPERATION);
    assert!(!operation.is_done());
    assert_eq!(operation.metadata.as_option().unwrap()["percent"], 40);
}

#[tokio::test]
async fn test_unknown_fields_are_retained() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "done": true,
            "response": {"result": "ok"},
            "introducedLater": {"nested": [1, 2, 3]}
        })))
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let operation = checks
        .accounts()
        .apps()
        .operations()
        .get(OPERATION)
        .execute()
        .await
        .unwrap();

    assert_eq!(operation.extra()["introducedLater"], json!({"nested": [1, 2, 3]}));
    assert!(matches!(operation.state, OperationState::Succeeded(_)));
}

#[tokio::test]
async fn test_etag_header_fills_missing_version_tag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"v7\"")
                .set_body_json(json!({"name": OPERATION})),
        )
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let response = checks
        .accounts()
        .apps()
        .operations()
        .get(OPERATION)
        .execute_with_response()
        .await
        .unwrap();

    assert_eq!(response.code(), 200);
    assert_eq!(response.etag(), Some("\"v7\""));
    assert_eq!(response.header("etag"), Some("\"v7\""));
}

#[tokio::test]
async fn test_cancel_posts_body_and_decodes_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{OPERATION_PATH}:cancel")))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let empty = checks
        .accounts()
        .apps()
        .operations()
        .cancel(OPERATION, &CancelOperationRequest::default())
        .execute()
        .await
        .unwrap();

    assert_eq!(empty, Empty::default());
}

#[tokio::test]
async fn test_list_sends_paging_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1alpha/accounts/123/apps/456/operations"))
        .and(query_param("pageSize", "2"))
        .and(query_param("pageToken", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operations": [
                {"name": "accounts/123/apps/456/operations/1"},
                {"name": "accounts/123/apps/456/operations/2", "done": true,
                 "error": {"code": 13, "message": "internal"}}
            ],
            "nextPageToken": "def"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let page = checks
        .accounts()
        .apps()
        .operations()
        .list("accounts/123/apps/456")
        .page_size(2)
        .page_token("abc")
        .execute()
        .await
        .unwrap();

    assert_eq!(page.operations.len(), 2);
    assert_eq!(page.operations[1].error().unwrap().code, 13);
    assert_eq!(page.next_page_token.as_deref(), Some("def"));
}

// ============================================================================
// Credentials
// ============================================================================

#[tokio::test]
async fn test_api_key_is_sent_as_key_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(OPERATION_PATH))
        .and(query_param("key", "my-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let checks = checks_for(
        &server,
        Some(Credentials::ApiKey(ApiKey::new("my-key").unwrap())),
    );
    checks
        .accounts()
        .apps()
        .operations()
        .delete(OPERATION)
        .execute()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bearer_token_is_sent_as_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .and(header("authorization", "Bearer ya29.token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OPERATION})))
        .expect(1)
        .mount(&server)
        .await;

    let checks = checks_for(
        &server,
        Some(Credentials::BearerToken(AccessToken::new("ya29.token").unwrap())),
    );
    checks
        .accounts()
        .apps()
        .operations()
        .get(OPERATION)
        .execute()
        .await
        .unwrap();
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_bad_name_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let result = checks
        .accounts()
        .apps()
        .operations()
        .get("bad-name")
        .execute()
        .await;

    assert!(matches!(
        result,
        Err(Failure::Validation(ValidationError::PatternMismatch { .. }))
    ));
}

#[tokio::test]
async fn test_empty_name_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let result = checks.accounts().apps().operations().get("").execute().await;

    assert!(matches!(
        result,
        Err(Failure::Validation(ValidationError::EmptyParameter { .. }))
    ));
}

#[tokio::test]
async fn test_remote_error_preserves_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "Operation not found.",
                "status": "NOT_FOUND",
                "details": [{"@type": "type.googleapis.com/google.rpc.ResourceInfo"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let failure = checks
        .accounts()
        .apps()
        .operations()
        .get(OPERATION)
        .execute()
        .await
        .unwrap_err();

    assert_eq!(failure.status_code(), Some(404));
    let remote = failure.remote().unwrap();
    assert_eq!(remote.message, "Operation not found.");
    assert_eq!(remote.status.as_deref(), Some("NOT_FOUND"));
    assert_eq!(remote.details.len(), 1);
}

#[tokio::test]
async fn test_non_envelope_error_body_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let failure = checks
        .accounts()
        .apps()
        .operations()
        .get(OPERATION)
        .execute()
        .await
        .unwrap_err();

    assert_eq!(failure.status_code(), Some(503));
    assert_eq!(failure.remote().unwrap().message, "upstream unavailable");
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "done": true,
            "response": {},
            "error": {"code": 2, "message": "both"}
        })))
        .mount(&server)
        .await;

    let checks = checks_for(&server, None);
    let result = checks
        .accounts()
        .apps()
        .operations()
        .get(OPERATION)
        .execute()
        .await;

    assert!(matches!(result, Err(Failure::Decode { .. })));
}

#[tokio::test]
async fn test_timeout_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OPERATION_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({"name": OPERATION})),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .root_url(RootUrl::new(server.uri()).unwrap())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let checks = Checks::new(config).unwrap();
    let failure = checks
        .accounts()
        .apps()
        .operations()
        .get(OPERATION)
        .execute()
        .await
        .unwrap_err();

    match failure {
        Failure::Transport(e) => assert!(e.is_timeout()),
        other => panic!("Expected transport failure, got {other:?}"),
    }
}
