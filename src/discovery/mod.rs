//! Services described at runtime by a discovery document.
//!
//! A discovery document lists an API's root URL, scopes, resources and
//! methods as JSON. This module maps the document with serde and turns it
//! into a [`ServiceDescriptor`], so that any described API can be called
//! without generated code. Responses decode into
//! [`DynamicRecord`](crate::rest::DynamicRecord).
//!
//! # Example
//!
//! ```rust
//! use discovery_client::ClientConfig;
//! use discovery_client::rest::Service;
//!
//! let document = r#"{
//!     "name": "example",
//!     "version": "v1",
//!     "rootUrl": "https://example.googleapis.com/",
//!     "servicePath": "",
//!     "resources": {
//!         "things": {
//!             "methods": {
//!                 "get": {
//!                     "id": "example.things.get",
//!                     "path": "v1/{+name}",
//!                     "httpMethod": "GET",
//!                     "parameters": {
//!                         "name": {"type": "string", "location": "path", "required": true, "pattern": "^things/[^/]+$"}
//!                     },
//!                     "parameterOrder": ["name"]
//!                 }
//!             }
//!         }
//!     }
//! }"#;
//!
//! let service = Service::from_discovery_json(document, ClientConfig::default()).unwrap();
//! let get = service.resource("things").unwrap().method("get").unwrap();
//! assert_eq!(get.path().as_str(), "v1/{+name}");
//! ```

mod document;

pub use document::{
    Auth, Document, MethodSchema, OAuth2, ParameterSchema, ResourceSchema, SchemaRef, ScopeInfo,
};

use crate::auth::Scopes;
use crate::config::{ClientConfig, RootUrl};
use crate::error::ConfigError;
use crate::rest::{
    is_standard_parameter, MethodDescriptor, ParamDescriptor, ResourceDescriptor, Service,
    ServiceDescriptor,
};

impl ServiceDescriptor {
    /// Builds a descriptor from a parsed discovery document.
    ///
    /// Document-level parameters that are not standard parameters become
    /// service parameters. Top-level methods hang off the root resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the root URL, a scope, a pattern, an HTTP
    /// verb or a path template is invalid, or if a method contradicts its
    /// own parameter list.
    pub fn from_discovery(document: &Document) -> Result<Self, ConfigError> {
        let root_url = RootUrl::new(document.root_url.as_str())?;
        let scopes = document.scope_names().collect::<Vec<_>>().join(" ").parse::<Scopes>()?;

        let mut builder = Self::builder(&document.name, &document.version, root_url)
            .service_path(&document.service_path)
            .scopes(scopes);
        if let Some(discovery_version) = &document.discovery_version {
            builder = builder.discovery_version(discovery_version);
        }
        if let Some(batch_path) = &document.batch_path {
            builder = builder.batch_path(batch_path);
        }
        if let Some(title) = &document.title {
            builder = builder.title(title);
        }
        for (name, schema) in &document.parameters {
            if !is_standard_parameter(name) {
                builder = builder.parameter(param_descriptor(name, schema)?.optional());
            }
        }
        for (name, schema) in &document.resources {
            builder = builder.resource(resource_descriptor(name, schema)?);
        }

        let descriptor = builder.build()?;
        if document.methods.is_empty() {
            return Ok(descriptor);
        }

        let mut root = descriptor.root().clone();
        for schema in document.methods.values() {
            root = root.with_method(method_descriptor(schema)?)?;
        }
        Ok(descriptor.with_root(root))
    }
}

impl Service {
    /// Parses a discovery document and binds it to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document does not parse or describes
    /// an invalid service, or if the transport cannot be built.
    pub fn from_discovery_json(json: &str, config: ClientConfig) -> Result<Self, ConfigError> {
        let document = Document::from_json(json)?;
        Self::new(ServiceDescriptor::from_discovery(&document)?, config)
    }
}

fn resource_descriptor(
    name: &str,
    schema: &ResourceSchema,
) -> Result<ResourceDescriptor, ConfigError> {
    let mut resource = ResourceDescriptor::new(name);
    for method in schema.methods.values() {
        resource = resource.with_method(method_descriptor(method)?)?;
    }
    for (child, child_schema) in &schema.resources {
        resource = resource.with_resource(resource_descriptor(child, child_schema)?)?;
    }
    Ok(resource)
}

fn method_descriptor(schema: &MethodSchema) -> Result<MethodDescriptor, ConfigError> {
    let http_method = schema
        .http_method
        .parse()
        .map_err(|_| ConfigError::MalformedMethod {
            method: schema.id.clone(),
            reason: format!("unsupported HTTP method '{}'", schema.http_method),
        })?;

    let mut ordered: Vec<(&String, &ParameterSchema)> = schema
        .parameter_order
        .iter()
        .filter_map(|name| schema.parameters.get_key_value(name))
        .collect();
    ordered.extend(
        schema
            .parameters
            .iter()
            .filter(|(name, _)| !schema.parameter_order.contains(*name)),
    );

    let params = ordered
        .into_iter()
        .map(|(name, param)| param_descriptor(name, param))
        .collect::<Result<Vec<_>, _>>()?;

    let scopes = schema.scopes.join(" ").parse::<Scopes>()?;
    let mut builder = MethodDescriptor::builder(&schema.id, http_method, &schema.path)
        .params(params)
        .scopes(scopes);
    if let Some(request) = &schema.request {
        builder = builder.request(&request.reference);
    }
    if let Some(response) = &schema.response {
        builder = builder.response(&response.reference);
    }
    if let Some(description) = &schema.description {
        builder = builder.description(description);
    }
    builder.build()
}

fn param_descriptor(name: &str, schema: &ParameterSchema) -> Result<ParamDescriptor, ConfigError> {
    let mut param = match schema.location.as_deref() {
        Some("path") => ParamDescriptor::path(name),
        Some("query") | None => {
            let param = ParamDescriptor::query(name);
            if schema.required {
                param.required()
            } else {
                param
            }
        }
        Some(other) => {
            return Err(ConfigError::InvalidDiscoveryDocument {
                reason: format!("parameter '{name}' has unsupported location '{other}'"),
            })
        }
    };
    if schema.repeated {
        param = param.repeated();
    }
    match &schema.pattern {
        Some(pattern) => param.pattern(pattern),
        None => Ok(param),
    }
}
