//! Method descriptors.
//!
//! A [`MethodDescriptor`] is the static declaration of one REST method: its
//! id, HTTP verb, path template, parameter list, body and response record
//! names, and the scopes that authorize it. Descriptors are validated once,
//! when they are built, so that a request built from one only has to check
//! the values bound to it.
//!
//! # Example
//!
//! ```rust
//! use discovery_client::clients::HttpMethod;
//! use discovery_client::rest::{MethodDescriptor, ParamDescriptor};
//!
//! let get = MethodDescriptor::builder(
//!     "checks.accounts.apps.operations.get",
//!     HttpMethod::Get,
//!     "v1alpha/{+name}",
//! )
//! .param(
//!     ParamDescriptor::path("name")
//!         .pattern("^accounts/[^/]+/apps/[^/]+/operations/[^/]+$")
//!         .unwrap(),
//! )
//! .response("Operation")
//! .build()
//! .unwrap();
//!
//! assert_eq!(get.name(), "get");
//! assert!(!get.has_body());
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::auth::Scopes;
use crate::clients::HttpMethod;
use crate::error::ConfigError;
use crate::rest::errors::ValidationError;
use crate::rest::param::{is_standard_parameter, ParamDescriptor, ParamKind, ParamValue};
use crate::rest::path::PathTemplate;

/// Static declaration of a REST method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    id: String,
    http_method: HttpMethod,
    path: PathTemplate,
    params: Vec<ParamDescriptor>,
    request_type: Option<String>,
    response_type: Option<String>,
    scopes: Scopes,
    description: Option<String>,
}

impl MethodDescriptor {
    /// Starts a descriptor for the method `id` (e.g., `checks.accounts.apps.operations.get`).
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        http_method: HttpMethod,
        path: impl Into<String>,
    ) -> MethodDescriptorBuilder {
        MethodDescriptorBuilder {
            id: id.into(),
            http_method,
            path: path.into(),
            params: Vec::new(),
            request_type: None,
            response_type: None,
            scopes: Scopes::new(),
            description: None,
        }
    }

    /// Returns the fully qualified method id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the method's own name, the last segment of its id.
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.rsplit('.').next().unwrap_or(&self.id)
    }

    /// Returns the HTTP verb.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// Returns the path template.
    #[must_use]
    pub const fn path(&self) -> &PathTemplate {
        &self.path
    }

    /// Returns all declared parameters, body included.
    #[must_use]
    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    /// Looks up a declared parameter by wire name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamDescriptor> {
        self.params.iter().find(|p| p.name() == name)
    }

    /// Returns `true` if the method takes a request body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.params.iter().any(|p| p.kind() == ParamKind::Body)
    }

    /// Returns the request body record name, if the method takes a body.
    #[must_use]
    pub fn request_type(&self) -> Option<&str> {
        self.request_type.as_deref()
    }

    /// Returns the response record name, if declared.
    #[must_use]
    pub fn response_type(&self) -> Option<&str> {
        self.response_type.as_deref()
    }

    /// Returns the scopes that authorize this method.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Returns the method description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Checks bound values against the declaration.
    ///
    /// `extra` names service-level query parameters accepted on top of the
    /// standard ones.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking declared
    /// parameters in declaration order, then unknown names, then the body.
    pub fn validate(
        &self,
        bound: &BTreeMap<String, ParamValue>,
        extra: &[ParamDescriptor],
        has_body: bool,
    ) -> Result<(), ValidationError> {
        for param in self.params.iter().filter(|p| p.kind() != ParamKind::Body) {
            match bound.get(param.name()) {
                None if param.is_required() => {
                    return Err(ValidationError::MissingParameter {
                        method: self.id.clone(),
                        name: param.name().to_string(),
                    });
                }
                None => {}
                Some(value) => self.check_value(param, value)?,
            }
        }

        for (name, value) in bound {
            match self.param(name) {
                Some(param) if param.kind() != ParamKind::Body => {}
                Some(_) => {
                    return Err(ValidationError::UnknownParameter {
                        method: self.id.clone(),
                        name: name.clone(),
                    });
                }
                None => {
                    if let Some(param) = extra.iter().find(|p| p.name() == name) {
                        self.check_value(param, value)?;
                    } else if !is_standard_parameter(name) {
                        return Err(ValidationError::UnknownParameter {
                            method: self.id.clone(),
                            name: name.clone(),
                        });
                    }
                }
            }
        }

        match (self.has_body(), has_body) {
            (true, false) => Err(ValidationError::MissingBody {
                method: self.id.clone(),
            }),
            (false, true) => Err(ValidationError::UnexpectedBody {
                method: self.id.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn check_value(&self, param: &ParamDescriptor, value: &ParamValue) -> Result<(), ValidationError> {
        if param.is_required() && value.is_empty() {
            return Err(ValidationError::EmptyParameter {
                method: self.id.clone(),
                name: param.name().to_string(),
            });
        }
        if !param.is_repeated() && value.as_single().is_none() {
            return Err(ValidationError::NotRepeated {
                method: self.id.clone(),
                name: param.name().to_string(),
            });
        }
        if let Some(pattern) = param.pattern_ref() {
            if let Some(bad) = value.values().find(|v| !pattern.is_match(v)) {
                return Err(ValidationError::PatternMismatch {
                    method: self.id.clone(),
                    name: param.name().to_string(),
                    value: bad.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`MethodDescriptor`].
#[derive(Debug)]
pub struct MethodDescriptorBuilder {
    id: String,
    http_method: HttpMethod,
    path: String,
    params: Vec<ParamDescriptor>,
    request_type: Option<String>,
    response_type: Option<String>,
    scopes: Scopes,
    description: Option<String>,
}

impl MethodDescriptorBuilder {
    /// Declares a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }

    /// Declares several parameters.
    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = ParamDescriptor>) -> Self {
        self.params.extend(params);
        self
    }

    /// Declares a request body of the named record type.
    #[must_use]
    pub fn request(mut self, type_name: impl Into<String>) -> Self {
        self.request_type = Some(type_name.into());
        self
    }

    /// Declares the response record type.
    #[must_use]
    pub fn response(mut self, type_name: impl Into<String>) -> Self {
        self.response_type = Some(type_name.into());
        self
    }

    /// Sets the scopes that authorize the method.
    #[must_use]
    pub fn scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = scopes;
        self
    }

    /// Sets the method description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates and builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - the id is blank or the path template does not parse
    /// - a parameter name is declared twice
    /// - the template placeholders differ from the declared path parameters
    /// - a path parameter is optional or repeated
    /// - a body is declared on a GET method
    pub fn build(mut self) -> Result<MethodDescriptor, ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::MissingRequiredField { field: "method id" });
        }
        let malformed = |reason: String| ConfigError::MalformedMethod {
            method: self.id.clone(),
            reason,
        };

        let path = PathTemplate::parse(&self.path)?;

        if self.request_type.is_some()
            && !self.params.iter().any(|p| p.kind() == ParamKind::Body)
        {
            self.params.push(ParamDescriptor::body());
        }

        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name()) {
                return Err(ConfigError::DuplicateName {
                    kind: "parameter",
                    name: param.name().to_string(),
                    parent: self.id.clone(),
                });
            }
        }

        let placeholders: HashSet<&str> = path.placeholders().collect();
        let path_params: HashSet<&str> = self
            .params
            .iter()
            .filter(|p| p.kind() == ParamKind::Path)
            .map(ParamDescriptor::name)
            .collect();
        if placeholders != path_params {
            let mut missing: Vec<_> = placeholders.symmetric_difference(&path_params).collect();
            missing.sort();
            return Err(malformed(format!(
                "path template '{path}' and path parameters disagree on {missing:?}"
            )));
        }

        if let Some(param) = self
            .params
            .iter()
            .find(|p| p.kind() == ParamKind::Path && (!p.is_required() || p.is_repeated()))
        {
            return Err(malformed(format!(
                "path parameter '{}' must be required and single-valued",
                param.name()
            )));
        }

        let has_body = self.params.iter().any(|p| p.kind() == ParamKind::Body);
        if has_body && !self.http_method.allows_body() {
            return Err(malformed(format!(
                "{} methods cannot take a request body",
                self.http_method
            )));
        }

        Ok(MethodDescriptor {
            id: self.id,
            http_method: self.http_method,
            path,
            params: self.params,
            request_type: self.request_type,
            response_type: self.response_type,
            scopes: self.scopes,
            description: self.description,
        })
    }
}
