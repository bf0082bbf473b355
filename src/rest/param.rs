//! Declarative parameter descriptors.
//!
//! Each method lists its parameters as [`ParamDescriptor`] records: wire
//! name, location, whether it is required, whether it repeats, and for path
//! parameters an optional pattern the bound value must match. The request
//! builder consults this list when it validates and assembles a request.
//!
//! # Example
//!
//! ```rust
//! use discovery_client::rest::{ParamDescriptor, ParamKind};
//!
//! let name = ParamDescriptor::path("name")
//!     .pattern("^accounts/[^/]+/apps/[^/]+/operations/[^/]+$")
//!     .unwrap();
//! assert_eq!(name.kind(), ParamKind::Path);
//! assert!(name.is_required());
//! assert!(name.matches("accounts/1/apps/2/operations/3"));
//! assert!(!name.matches("bad-name"));
//! ```

use std::fmt;

use regex::Regex;

use crate::error::ConfigError;

/// Query parameters every method accepts in addition to its own.
pub const STANDARD_PARAMETERS: &[&str] = &[
    "$.xgafv",
    "access_token",
    "alt",
    "callback",
    "fields",
    "key",
    "oauth_token",
    "prettyPrint",
    "quotaUser",
    "uploadType",
    "upload_protocol",
];

/// Returns `true` if `name` is one of the [`STANDARD_PARAMETERS`].
#[must_use]
pub fn is_standard_parameter(name: &str) -> bool {
    STANDARD_PARAMETERS.contains(&name)
}

/// Where a parameter travels on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Substituted into the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as the JSON request body.
    Body,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        })
    }
}

/// Whether a parameter must be bound before execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// Execution fails locally if the parameter is absent or empty.
    Required,
    /// The parameter may be omitted.
    Optional,
}

/// A compiled parameter pattern.
///
/// The whole value must match; the source is compiled as `^(?:source)$`.
/// Equality compares the declared source.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern for the named parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the pattern does not compile.
    pub fn new(parameter: &str, pattern: &str) -> Result<Self, ConfigError> {
        let regex =
            Regex::new(&format!("^(?:{pattern})$")).map_err(|e| ConfigError::InvalidPattern {
                parameter: parameter.to_string(),
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if `value` matches.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

/// Declaration of a single method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamDescriptor {
    name: String,
    kind: ParamKind,
    requirement: Requirement,
    repeated: bool,
    pattern: Option<Pattern>,
}

impl ParamDescriptor {
    /// Wire name of the request body parameter.
    pub const BODY: &'static str = "body";

    /// Declares a required path parameter.
    #[must_use]
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Path,
            requirement: Requirement::Required,
            repeated: false,
            pattern: None,
        }
    }

    /// Declares an optional query parameter.
    #[must_use]
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Query,
            requirement: Requirement::Optional,
            repeated: false,
            pattern: None,
        }
    }

    /// Declares the required request body.
    #[must_use]
    pub fn body() -> Self {
        Self {
            name: Self::BODY.to_string(),
            kind: ParamKind::Body,
            requirement: Requirement::Required,
            repeated: false,
            pattern: None,
        }
    }

    /// Marks the parameter as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    /// Marks the parameter as optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.requirement = Requirement::Optional;
        self
    }

    /// Allows the parameter to carry several values.
    #[must_use]
    pub const fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Attaches a pattern every bound value must match.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.pattern = Some(Pattern::new(&self.name, pattern)?);
        Ok(self)
    }

    /// Returns the wire name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the parameter travels.
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Returns the requirement.
    #[must_use]
    pub const fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// Returns `true` if the parameter is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Required
    }

    /// Returns `true` if the parameter may repeat.
    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// Returns the declared pattern, if any.
    #[must_use]
    pub const fn pattern_ref(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Returns `true` if `value` satisfies the declared pattern (or there is none).
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.pattern.as_ref().map_or(true, |p| p.is_match(value))
    }
}

/// A value bound to a parameter on a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A single value.
    Single(String),
    /// Several values, sent as repeated query pairs.
    Repeated(Vec<String>),
}

impl ParamValue {
    /// Returns the values as a slice-like iterator.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Repeated(values) => values,
        };
        values.iter().map(String::as_str)
    }

    /// Returns the value if exactly one is bound.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Repeated(values) if values.len() == 1 => Some(&values[0]),
            Self::Repeated(_) => None,
        }
    }

    /// Returns `true` if no value (or only blank values) is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().all(|v| v.trim().is_empty())
    }
}
