//! Typed resource views.

use std::sync::Arc;

use crate::rest::{Empty, MethodDescriptor, Operation, OperationPoller, Request};
use crate::services::checks_v1alpha::records::{
    CancelOperationRequest, ListOperationsResponse, WaitOperationRequest,
};
use crate::services::checks_v1alpha::Checks;

/// The `accounts` resource.
#[derive(Clone, Copy, Debug)]
pub struct AccountsResource<'s> {
    checks: &'s Checks,
}

impl<'s> AccountsResource<'s> {
    pub(super) const fn new(checks: &'s Checks) -> Self {
        Self { checks }
    }

    /// Returns the `accounts.apps` resource.
    #[must_use]
    pub const fn apps(&self) -> AppsResource<'s> {
        AppsResource {
            checks: self.checks,
        }
    }
}

/// The `accounts.apps` resource.
#[derive(Clone, Copy, Debug)]
pub struct AppsResource<'s> {
    checks: &'s Checks,
}

impl<'s> AppsResource<'s> {
    /// Returns the `accounts.apps.operations` resource.
    #[must_use]
    pub const fn operations(&self) -> OperationsResource<'s> {
        OperationsResource {
            checks: self.checks,
        }
    }
}

/// The `accounts.apps.operations` resource.
#[derive(Clone, Copy, Debug)]
pub struct OperationsResource<'s> {
    checks: &'s Checks,
}

impl<'s> OperationsResource<'s> {
    fn request<T>(&self, method: &Arc<MethodDescriptor>) -> Request<T> {
        Request::new(self.checks.service.clone(), Arc::clone(method))
    }

    /// Gets the latest state of an operation.
    ///
    /// `name` has the form `accounts/{account}/apps/{app}/operations/{operation}`.
    #[must_use]
    pub fn get(&self, name: impl Into<String>) -> Request<Operation> {
        self.request(&self.checks.operations.get).param("name", name)
    }

    /// Lists the operations of an app.
    ///
    /// `name` is the app, `accounts/{account}/apps/{app}`.
    #[must_use]
    pub fn list(&self, name: impl Into<String>) -> Request<ListOperationsResponse> {
        self.request(&self.checks.operations.list).param("name", name)
    }

    /// Requests cancellation of an operation.
    #[must_use]
    pub fn cancel(
        &self,
        name: impl Into<String>,
        request: &CancelOperationRequest,
    ) -> Request<Empty> {
        self.request(&self.checks.operations.cancel)
            .param("name", name)
            .body(request)
    }

    /// Deletes an operation record.
    #[must_use]
    pub fn delete(&self, name: impl Into<String>) -> Request<Empty> {
        self.request(&self.checks.operations.delete).param("name", name)
    }

    /// Waits server-side until the operation is done or the timeout elapses.
    #[must_use]
    pub fn wait(&self, name: impl Into<String>, request: &WaitOperationRequest) -> Request<Operation> {
        self.request(&self.checks.operations.wait)
            .param("name", name)
            .body(request)
    }

    /// Returns a poller that re-issues [`get`](Self::get) until the operation is done.
    #[must_use]
    pub fn poller(&self, name: impl Into<String>) -> OperationPoller {
        OperationPoller::new(self.get(name))
    }
}

impl Request<ListOperationsResponse> {
    /// Restricts the listing with a filter expression.
    #[must_use]
    pub fn filter(self, filter: impl Into<String>) -> Self {
        self.param("filter", filter)
    }

    /// Sets the page size.
    #[must_use]
    pub fn page_size(self, page_size: i32) -> Self {
        self.param("pageSize", page_size.to_string())
    }

    /// Continues from a previous page.
    #[must_use]
    pub fn page_token(self, page_token: impl Into<String>) -> Self {
        self.param("pageToken", page_token)
    }
}

#[cfg(test)]
mod tests {
    use crate::clients::HttpMethod;
    use crate::rest::ValidationError;
    use crate::services::checks_v1alpha::{
        CancelOperationRequest, Checks, WaitOperationRequest,
    };
    use crate::ClientConfig;
    use serde_json::json;

    const OPERATION: &str = "accounts/123/apps/456/operations/789";

    fn checks() -> Checks {
        Checks::new(ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_get_builds_expected_url() {
        let checks = checks();
        let request = checks.accounts().apps().operations().get(OPERATION).build().unwrap();
        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://checks.googleapis.com/v1alpha/accounts/123/apps/456/operations/789"
        );
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_get_rejects_bad_name() {
        let checks = checks();
        let result = checks.accounts().apps().operations().get("bad-name").build();
        assert!(matches!(
            result,
            Err(ValidationError::PatternMismatch { name, value, .. })
                if name == "name" && value == "bad-name"
        ));
    }

    #[test]
    fn test_list_with_paging() {
        let checks = checks();
        let request = checks
            .accounts()
            .apps()
            .operations()
            .list("accounts/123/apps/456")
            .filter("done=true")
            .page_size(50)
            .page_token("p2")
            .build()
            .unwrap();
        assert_eq!(
            request.url,
            "https://checks.googleapis.com/v1alpha/accounts/123/apps/456/operations"
        );
        assert_eq!(request.query_value("filter"), Some("done=true"));
        assert_eq!(request.query_value("pageSize"), Some("50"));
        assert_eq!(request.query_value("pageToken"), Some("p2"));
    }

    #[test]
    fn test_list_rejects_operation_name() {
        let checks = checks();
        let result = checks.accounts().apps().operations().list(OPERATION).build();
        assert!(matches!(result, Err(ValidationError::PatternMismatch { .. })));
    }

    #[test]
    fn test_cancel_and_wait_send_bodies() {
        let checks = checks();
        let operations = checks.accounts().apps().operations();

        let cancel = operations
            .cancel(OPERATION, &CancelOperationRequest::default())
            .build()
            .unwrap();
        assert_eq!(cancel.http_method, HttpMethod::Post);
        assert!(cancel.url.ends_with("operations/789:cancel"));
        assert_eq!(cancel.body, Some(json!({})));

        let wait = operations
            .wait(OPERATION, &WaitOperationRequest::with_timeout_secs(10))
            .build()
            .unwrap();
        assert!(wait.url.ends_with("operations/789:wait"));
        assert_eq!(wait.body, Some(json!({"timeout": "10s"})));
    }

    #[test]
    fn test_delete() {
        let checks = checks();
        let request = checks.accounts().apps().operations().delete(OPERATION).build().unwrap();
        assert_eq!(request.http_method, HttpMethod::Delete);
        assert!(request.body.is_none());
    }
}
