//! Service descriptors and the service handle.
//!
//! A [`ServiceDescriptor`] is the static description of an API: name,
//! version, root URL, batch path, declared scopes, service-level parameters
//! and the resource tree. A [`Service`] binds a descriptor to a
//! [`ClientConfig`] and a [`Transport`]; it is immutable, cheap to clone and
//! safe to share between tasks.
//!
//! # Example
//!
//! ```rust
//! use discovery_client::{ClientConfig, RootUrl};
//! use discovery_client::rest::{ResourceDescriptor, Service, ServiceDescriptor};
//!
//! let descriptor = ServiceDescriptor::builder(
//!     "example",
//!     "v1",
//!     RootUrl::new("https://example.googleapis.com/").unwrap(),
//! )
//! .resource(ResourceDescriptor::new("things"))
//! .build()
//! .unwrap();
//!
//! let service = Service::new(descriptor, ClientConfig::default()).unwrap();
//! assert_eq!(service.base_uri(), "https://example.googleapis.com/");
//! assert_eq!(service.batch_uri(), "https://example.googleapis.com/batch");
//! assert!(service.resource("things").is_some());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::auth::Scopes;
use crate::clients::{HttpClient, Transport};
use crate::config::{ClientConfig, RootUrl};
use crate::error::ConfigError;
use crate::rest::param::{ParamDescriptor, ParamKind};
use crate::rest::resource::{Resource, ResourceDescriptor};

/// Static description of an API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDescriptor {
    name: String,
    version: String,
    discovery_version: String,
    title: Option<String>,
    root_url: RootUrl,
    service_path: String,
    batch_path: String,
    scopes: Scopes,
    parameters: Vec<ParamDescriptor>,
    root: ResourceDescriptor,
}

impl ServiceDescriptor {
    /// Discovery version assumed when none is given.
    pub const DEFAULT_DISCOVERY_VERSION: &'static str = "v1";

    /// Batch path assumed when none is given.
    pub const DEFAULT_BATCH_PATH: &'static str = "batch";

    /// Starts a descriptor.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        version: impl Into<String>,
        root_url: RootUrl,
    ) -> ServiceDescriptorBuilder {
        ServiceDescriptorBuilder {
            name: name.into(),
            version: version.into(),
            discovery_version: Self::DEFAULT_DISCOVERY_VERSION.to_string(),
            title: None,
            root_url,
            service_path: String::new(),
            batch_path: Self::DEFAULT_BATCH_PATH.to_string(),
            scopes: Scopes::new(),
            parameters: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Returns the API name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the API version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the discovery format version tag.
    #[must_use]
    pub fn discovery_version(&self) -> &str {
        &self.discovery_version
    }

    /// Returns the human-readable title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the declared root URL.
    #[must_use]
    pub const fn root_url(&self) -> &RootUrl {
        &self.root_url
    }

    /// Returns the path appended to the root URL for every method.
    #[must_use]
    pub fn service_path(&self) -> &str {
        &self.service_path
    }

    /// Returns the batch endpoint path.
    #[must_use]
    pub fn batch_path(&self) -> &str {
        &self.batch_path
    }

    /// Returns the declared scopes.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Returns the service-level query parameters every method accepts.
    #[must_use]
    pub fn parameters(&self) -> &[ParamDescriptor] {
        &self.parameters
    }

    /// Returns the root of the resource tree.
    #[must_use]
    pub const fn root(&self) -> &ResourceDescriptor {
        &self.root
    }

    pub(crate) fn with_root(mut self, root: ResourceDescriptor) -> Self {
        self.root = root;
        self
    }
}

/// Builder for [`ServiceDescriptor`].
#[derive(Debug)]
pub struct ServiceDescriptorBuilder {
    name: String,
    version: String,
    discovery_version: String,
    title: Option<String>,
    root_url: RootUrl,
    service_path: String,
    batch_path: String,
    scopes: Scopes,
    parameters: Vec<ParamDescriptor>,
    resources: Vec<ResourceDescriptor>,
}

impl ServiceDescriptorBuilder {
    /// Sets the discovery format version tag.
    #[must_use]
    pub fn discovery_version(mut self, discovery_version: impl Into<String>) -> Self {
        self.discovery_version = discovery_version.into();
        self
    }

    /// Sets the human-readable title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the path appended to the root URL (empty by default).
    #[must_use]
    pub fn service_path(mut self, service_path: impl Into<String>) -> Self {
        self.service_path = service_path.into();
        self
    }

    /// Sets the batch endpoint path.
    #[must_use]
    pub fn batch_path(mut self, batch_path: impl Into<String>) -> Self {
        self.batch_path = batch_path.into();
        self
    }

    /// Sets the declared scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = scopes;
        self
    }

    /// Declares a service-level query parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: ParamDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Adds a top-level resource.
    #[must_use]
    pub fn resource(mut self, resource: ResourceDescriptor) -> Self {
        self.resources.push(resource);
        self
    }

    /// Validates and builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the name or version is blank, a top-level
    /// resource or a service parameter is declared twice, or a service
    /// parameter is not an optional query parameter.
    pub fn build(self) -> Result<ServiceDescriptor, ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingRequiredField { field: "name" });
        }
        if self.version.trim().is_empty() {
            return Err(ConfigError::MissingRequiredField { field: "version" });
        }

        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(parameter.name()) {
                return Err(ConfigError::DuplicateName {
                    kind: "parameter",
                    name: parameter.name().to_string(),
                    parent: self.name.clone(),
                });
            }
            if parameter.kind() != ParamKind::Query || parameter.is_required() {
                return Err(ConfigError::MalformedMethod {
                    method: self.name.clone(),
                    reason: format!(
                        "service parameter '{}' must be an optional query parameter",
                        parameter.name()
                    ),
                });
            }
        }

        let mut root = ResourceDescriptor::new(self.name.clone());
        for resource in self.resources {
            root = root.with_resource(resource)?;
        }

        Ok(ServiceDescriptor {
            name: self.name,
            version: self.version,
            discovery_version: self.discovery_version,
            title: self.title,
            root_url: self.root_url,
            service_path: self.service_path.trim_start_matches('/').to_string(),
            batch_path: self.batch_path.trim_start_matches('/').to_string(),
            scopes: self.scopes,
            parameters: self.parameters,
            root,
        })
    }
}

struct ServiceInner {
    descriptor: ServiceDescriptor,
    config: ClientConfig,
    root_url: RootUrl,
    transport: Arc<dyn Transport>,
}

/// An API bound to a configuration and a transport.
///
/// `Service` is a handle around shared immutable state; cloning it is cheap.
///
/// # Thread Safety
///
/// `Service` is `Send + Sync`. Requests created from it may be executed
/// concurrently from different tasks.
#[derive(Clone)]
pub struct Service {
    inner: Arc<ServiceInner>,
}

// Verify Service is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Service>();
};

impl Service {
    /// Binds a descriptor to a configuration, using [`HttpClient`] as transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the HTTP client cannot be built.
    pub fn new(descriptor: ServiceDescriptor, config: ClientConfig) -> Result<Self, ConfigError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self::with_transport(descriptor, config, Arc::new(transport)))
    }

    /// Binds a descriptor to a configuration and a caller-supplied transport.
    #[must_use]
    pub fn with_transport(
        descriptor: ServiceDescriptor,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let root_url = match config.root_url() {
            Some(root_url) if root_url != descriptor.root_url() => {
                tracing::debug!(
                    "Service {} overriding root URL {} with {}",
                    descriptor.name(),
                    descriptor.root_url(),
                    root_url
                );
                root_url.clone()
            }
            _ => descriptor.root_url().clone(),
        };

        Self {
            inner: Arc::new(ServiceInner {
                descriptor,
                config,
                root_url,
                transport,
            }),
        }
    }

    /// Returns the API name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.descriptor.name()
    }

    /// Returns the API version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.inner.descriptor.version()
    }

    /// Returns the discovery format version tag.
    #[must_use]
    pub fn discovery_version(&self) -> &str {
        self.inner.descriptor.discovery_version()
    }

    /// Returns the effective root URL (the configured override, if any).
    #[must_use]
    pub fn root_url(&self) -> &RootUrl {
        &self.inner.root_url
    }

    /// Returns the URI every method path is appended to.
    #[must_use]
    pub fn base_uri(&self) -> String {
        format!("{}{}", self.inner.root_url, self.inner.descriptor.service_path())
    }

    /// Returns the batch endpoint URI.
    #[must_use]
    pub fn batch_uri(&self) -> String {
        format!("{}{}", self.inner.root_url, self.inner.descriptor.batch_path())
    }

    /// Returns the declared scopes.
    #[must_use]
    pub fn scopes(&self) -> &Scopes {
        self.inner.descriptor.scopes()
    }

    /// Returns the descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.inner.descriptor
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns a view of the resource tree root.
    #[must_use]
    pub fn root(&self) -> Resource<'_> {
        Resource::new(self, self.inner.descriptor.root())
    }

    /// Returns the top-level resources.
    pub fn resources(&self) -> impl Iterator<Item = Resource<'_>> {
        self.root().resources()
    }

    /// Returns a top-level resource by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<Resource<'_>> {
        self.root().resource(name)
    }

    /// Returns a nested resource by dotted path, e.g. `accounts.apps.operations`.
    #[must_use]
    pub fn resource_at(&self, path: &str) -> Option<Resource<'_>> {
        path.split('.')
            .try_fold(self.root(), |resource, name| resource.resource(name))
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.name())
            .field("version", &self.version())
            .field("root_url", &self.root_url().as_ref())
            .field("transport", &self.inner.transport)
            .finish_non_exhaustive()
    }
}
