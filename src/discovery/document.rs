//! Serde mappings for discovery REST descriptions.
//!
//! Only the parts of the format that shape the client are mapped; record
//! schemas are kept as raw JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// A discovery REST description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Always `discovery#restDescription`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Format version, e.g. `v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_version: Option<String>,
    /// `name:version`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// API name.
    pub name: String,
    /// API version.
    pub version: String,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Root URL every path is relative to.
    pub root_url: String,
    /// Path between the root URL and method paths.
    #[serde(default)]
    pub service_path: String,
    /// Batch endpoint path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_path: Option<String>,
    /// Parameters every method accepts.
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterSchema>,
    /// Authorization declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    /// Top-level resources.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceSchema>,
    /// Top-level methods.
    #[serde(default)]
    pub methods: BTreeMap<String, MethodSchema>,
    /// Record schemas, kept verbatim.
    #[serde(default)]
    pub schemas: BTreeMap<String, Value>,
}

impl Document {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDiscoveryDocument`] if the text is not a
    /// discovery description.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidDiscoveryDocument {
            reason: e.to_string(),
        })
    }

    /// Returns the declared OAuth scope names.
    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.auth
            .iter()
            .filter_map(|auth| auth.oauth2.as_ref())
            .flat_map(|oauth2| oauth2.scopes.keys())
            .map(String::as_str)
    }
}

/// The `auth` block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
    /// OAuth 2.0 declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2>,
}

/// OAuth 2.0 scope declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2 {
    /// Scope URL to description.
    #[serde(default)]
    pub scopes: BTreeMap<String, ScopeInfo>,
}

/// Description of one scope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeInfo {
    /// What the scope grants.
    #[serde(default)]
    pub description: String,
}

/// A parameter declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSchema {
    /// JSON type of the value.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// `path` or `query`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Whether the parameter must be bound.
    #[serde(default)]
    pub required: bool,
    /// Whether the parameter may repeat.
    #[serde(default)]
    pub repeated: bool,
    /// Regular expression values must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Value format, e.g. `int32`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    /// Parameter description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A resource declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Methods of this resource.
    #[serde(default)]
    pub methods: BTreeMap<String, MethodSchema>,
    /// Nested resources.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceSchema>,
}

/// A method declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSchema {
    /// Fully qualified method id.
    pub id: String,
    /// Path template relative to the service path.
    pub path: String,
    /// Flattened path template, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_path: Option<String>,
    /// HTTP verb.
    pub http_method: String,
    /// Method description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Method parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterSchema>,
    /// Order of the positional parameters.
    #[serde(default)]
    pub parameter_order: Vec<String>,
    /// Request body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<SchemaRef>,
    /// Response schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<SchemaRef>,
    /// Scopes that authorize the method.
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// A reference to a named schema.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRef {
    /// The schema name.
    #[serde(rename = "$ref")]
    pub reference: String,
}
