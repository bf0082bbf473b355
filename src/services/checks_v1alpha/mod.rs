//! Checks API, version `v1alpha`: the long-running operations surface.
//!
//! The client declares its resource tree in code, the way a generator would
//! emit it:
//!
//! ```text
//! accounts
//! └── apps
//!     └── operations   get · list · cancel · delete · wait
//! ```
//!
//! # Example
//!
//! ```rust
//! use discovery_client::ClientConfig;
//! use discovery_client::services::checks_v1alpha::Checks;
//!
//! let checks = Checks::new(ClientConfig::default()).unwrap();
//! let request = checks
//!     .accounts()
//!     .apps()
//!     .operations()
//!     .get("accounts/123/apps/456/operations/789")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     request.url,
//!     "https://checks.googleapis.com/v1alpha/accounts/123/apps/456/operations/789"
//! );
//!
//! let invalid = checks.accounts().apps().operations().get("bad-name").build();
//! assert!(invalid.is_err());
//! ```

mod records;
mod resources;

use std::sync::Arc;

pub use records::{CancelOperationRequest, ListOperationsResponse, WaitOperationRequest};
pub use resources::{AccountsResource, AppsResource, OperationsResource};

pub use crate::rest::{Empty, Operation};

use crate::auth::Scopes;
use crate::clients::{HttpMethod, Transport};
use crate::config::{ClientConfig, RootUrl};
use crate::error::ConfigError;
use crate::rest::{MethodDescriptor, ParamDescriptor, ResourceDescriptor, Service, ServiceDescriptor};

/// API name.
pub const NAME: &str = "checks";

/// API version.
pub const VERSION: &str = "v1alpha";

/// Default root URL.
pub const ROOT_URL: &str = "https://checks.googleapis.com/";

/// Batch endpoint path.
pub const BATCH_PATH: &str = "batch";

/// Scope granting access to Checks data.
pub const CHECKS_SCOPE: &str = "https://www.googleapis.com/auth/checks";

const APP_PATTERN: &str = "^accounts/[^/]+/apps/[^/]+$";
const OPERATION_PATTERN: &str = "^accounts/[^/]+/apps/[^/]+/operations/[^/]+$";

#[derive(Debug)]
struct OperationMethods {
    get: Arc<MethodDescriptor>,
    list: Arc<MethodDescriptor>,
    cancel: Arc<MethodDescriptor>,
    delete: Arc<MethodDescriptor>,
    wait: Arc<MethodDescriptor>,
}

/// Client for the Checks API.
///
/// `Checks` is cheap to clone and `Send + Sync`.
#[derive(Clone, Debug)]
pub struct Checks {
    service: Service,
    operations: Arc<OperationMethods>,
}

impl Checks {
    /// Creates a client with the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let (descriptor, operations) = declare()?;
        Ok(Self {
            service: Service::new(descriptor, config)?,
            operations: Arc::new(operations),
        })
    }

    /// Creates a client that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the service declaration is invalid.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        let (descriptor, operations) = declare()?;
        Ok(Self {
            service: Service::with_transport(descriptor, config, transport),
            operations: Arc::new(operations),
        })
    }

    /// Returns the service descriptor of this API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the service declaration is invalid.
    pub fn descriptor() -> Result<ServiceDescriptor, ConfigError> {
        declare().map(|(descriptor, _)| descriptor)
    }

    /// Returns the underlying generic service.
    #[must_use]
    pub const fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the `accounts` resource.
    #[must_use]
    pub const fn accounts(&self) -> AccountsResource<'_> {
        AccountsResource::new(self)
    }
}

fn declare() -> Result<(ServiceDescriptor, OperationMethods), ConfigError> {
    let scopes: Scopes = CHECKS_SCOPE.parse()?;
    let id = |method: &str| format!("{NAME}.accounts.apps.operations.{method}");
    let operation_name = || ParamDescriptor::path("name").pattern(OPERATION_PATTERN);

    let methods = OperationMethods {
        get: Arc::new(
            MethodDescriptor::builder(id("get"), HttpMethod::Get, "v1alpha/{+name}")
                .param(operation_name()?)
                .response("Operation")
                .scopes(scopes.clone())
                .description("Gets the latest state of a long-running operation.")
                .build()?,
        ),
        list: Arc::new(
            MethodDescriptor::builder(id("list"), HttpMethod::Get, "v1alpha/{+name}/operations")
                .param(ParamDescriptor::path("name").pattern(APP_PATTERN)?)
                .param(ParamDescriptor::query("filter"))
                .param(ParamDescriptor::query("pageSize").pattern("^-?[0-9]+$")?)
                .param(ParamDescriptor::query("pageToken"))
                .response("ListOperationsResponse")
                .scopes(scopes.clone())
                .description("Lists operations that match the specified filter.")
                .build()?,
        ),
        cancel: Arc::new(
            MethodDescriptor::builder(id("cancel"), HttpMethod::Post, "v1alpha/{+name}:cancel")
                .param(operation_name()?)
                .request("CancelOperationRequest")
                .response("Empty")
                .scopes(scopes.clone())
                .description("Starts asynchronous cancellation of a long-running operation.")
                .build()?,
        ),
        delete: Arc::new(
            MethodDescriptor::builder(id("delete"), HttpMethod::Delete, "v1alpha/{+name}")
                .param(operation_name()?)
                .response("Empty")
                .scopes(scopes.clone())
                .description("Deletes a long-running operation.")
                .build()?,
        ),
        wait: Arc::new(
            MethodDescriptor::builder(id("wait"), HttpMethod::Post, "v1alpha/{+name}:wait")
                .param(operation_name()?)
                .request("WaitOperationRequest")
                .response("Operation")
                .scopes(scopes.clone())
                .description("Waits until the operation is done or the timeout elapses.")
                .build()?,
        ),
    };

    let operations = ResourceDescriptor::new("operations")
        .with_method(Arc::clone(&methods.cancel))?
        .with_method(Arc::clone(&methods.delete))?
        .with_method(Arc::clone(&methods.get))?
        .with_method(Arc::clone(&methods.list))?
        .with_method(Arc::clone(&methods.wait))?;
    let apps = ResourceDescriptor::new("apps").with_resource(operations)?;
    let accounts = ResourceDescriptor::new("accounts").with_resource(apps)?;

    let descriptor = ServiceDescriptor::builder(NAME, VERSION, RootUrl::new(ROOT_URL)?)
        .discovery_version("v1")
        .title("Checks API")
        .batch_path(BATCH_PATH)
        .scopes(scopes)
        .resource(accounts)
        .build()?;

    Ok((descriptor, methods))
}
