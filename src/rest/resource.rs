//! The resource tree.
//!
//! A service groups its methods into named resources, which may nest
//! (`accounts` → `apps` → `operations`). The tree is plain data,
//! [`ResourceDescriptor`], owned by the service. Callers navigate it through
//! [`Resource`], a borrowed view that also knows which service it belongs to
//! and can therefore create requests.
//!
//! # Example
//!
//! ```rust
//! use discovery_client::clients::HttpMethod;
//! use discovery_client::rest::{MethodDescriptor, ParamDescriptor, ResourceDescriptor};
//!
//! let operations = ResourceDescriptor::new("operations")
//!     .with_method(
//!         MethodDescriptor::builder("svc.operations.get", HttpMethod::Get, "v1/{+name}")
//!             .param(ParamDescriptor::path("name"))
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! assert!(operations.method("get").is_some());
//! assert!(operations.method("list").is_none());
//! ```

use std::sync::Arc;

use crate::error::ConfigError;
use crate::rest::errors::ValidationError;
use crate::rest::method::MethodDescriptor;
use crate::rest::record::Record;
use crate::rest::request::Request;
use crate::rest::service::Service;

/// A named node in a service's resource tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    name: String,
    resources: Vec<ResourceDescriptor>,
    methods: Vec<Arc<MethodDescriptor>>,
}

impl ResourceDescriptor {
    /// Creates an empty resource.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Adds a child resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateName`] if a child with the same name exists.
    pub fn with_resource(mut self, resource: Self) -> Result<Self, ConfigError> {
        if self.resource(&resource.name).is_some() {
            return Err(ConfigError::DuplicateName {
                kind: "resource",
                name: resource.name,
                parent: self.name,
            });
        }
        self.resources.push(resource);
        Ok(self)
    }

    /// Adds a method. Accepts an owned or an already shared descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateName`] if a method with the same name exists.
    pub fn with_method(
        mut self,
        method: impl Into<Arc<MethodDescriptor>>,
    ) -> Result<Self, ConfigError> {
        let method = method.into();
        if self.method(method.name()).is_some() {
            return Err(ConfigError::DuplicateName {
                kind: "method",
                name: method.name().to_string(),
                parent: self.name,
            });
        }
        self.methods.push(method);
        Ok(self)
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a child resource by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&Self> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Returns the child resources in declaration order.
    #[must_use]
    pub fn resources(&self) -> &[Self] {
        &self.resources
    }

    /// Returns a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Arc<MethodDescriptor>> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Returns the methods in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[Arc<MethodDescriptor>] {
        &self.methods
    }

    /// Walks the subtree depth-first, yielding every method.
    pub fn all_methods(&self) -> Box<dyn Iterator<Item = &Arc<MethodDescriptor>> + '_> {
        Box::new(
            self.methods
                .iter()
                .chain(self.resources.iter().flat_map(Self::all_methods)),
        )
    }
}

/// A borrowed view of a resource inside a [`Service`].
///
/// The view does not own the service; it lives as long as the borrow.
#[derive(Clone, Copy, Debug)]
pub struct Resource<'s> {
    service: &'s Service,
    descriptor: &'s ResourceDescriptor,
}

impl<'s> Resource<'s> {
    pub(crate) const fn new(service: &'s Service, descriptor: &'s ResourceDescriptor) -> Self {
        Self {
            service,
            descriptor,
        }
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &'s str {
        self.descriptor.name()
    }

    /// Returns the service this resource belongs to.
    #[must_use]
    pub const fn service(&self) -> &'s Service {
        self.service
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &'s ResourceDescriptor {
        self.descriptor
    }

    /// Returns a child resource by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<Self> {
        self.descriptor
            .resource(name)
            .map(|descriptor| Self::new(self.service, descriptor))
    }

    /// Returns the child resources.
    pub fn resources(&self) -> impl Iterator<Item = Resource<'s>> + 's {
        let service = self.service;
        self.descriptor
            .resources()
            .iter()
            .map(move |descriptor| Resource::new(service, descriptor))
    }

    /// Returns a method descriptor by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&'s MethodDescriptor> {
        self.descriptor.method(name).map(AsRef::as_ref)
    }

    /// Returns the method descriptors.
    pub fn methods(&self) -> impl Iterator<Item = &'s MethodDescriptor> + 's {
        self.descriptor.methods().iter().map(AsRef::as_ref)
    }

    /// Creates a request for the named method, decoding into `T`.
    ///
    /// No I/O happens here; parameters are validated when the request is
    /// built or executed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownMethod`] if the resource has no such method.
    pub fn request<T: Record>(&self, method: &str) -> Result<Request<T>, ValidationError> {
        self.descriptor
            .method(method)
            .map(|descriptor| Request::new(self.service.clone(), Arc::clone(descriptor)))
            .ok_or_else(|| ValidationError::UnknownMethod {
                resource: self.descriptor.name().to_string(),
                method: method.to_string(),
            })
    }
}
