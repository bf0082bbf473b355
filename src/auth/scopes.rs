//! OAuth scope sets declared by a service.
//!
//! This module provides the [`Scopes`] type. Services declare the scopes
//! their methods accept; each method lists the subset it needs.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A set of OAuth 2.0 scopes.
///
/// Scopes are opaque strings (usually URLs such as
/// `https://www.googleapis.com/auth/cloud-platform`). Parsing accepts
/// whitespace- or comma-separated lists; the set is ordered so that its
/// textual form is stable.
///
/// # Serialization
///
/// `Scopes` serializes to a single space-separated string, the form used by
/// the OAuth 2.0 `scope` parameter.
///
/// # Example
///
/// ```rust
/// use discovery_client::Scopes;
///
/// let declared: Scopes = "https://www.googleapis.com/auth/a https://www.googleapis.com/auth/b"
///     .parse()
///     .unwrap();
/// let needed: Scopes = "https://www.googleapis.com/auth/a".parse().unwrap();
/// assert!(declared.covers(&needed));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Scopes {
    scopes: BTreeSet<String>,
}

impl Scopes {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the number of scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if `scope` is part of this set.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Returns `true` if this scope set contains every scope in `other`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other.scopes.is_subset(&self.scopes)
    }

    /// Returns an iterator over the scopes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    /// Adds a single scope.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidScopes`] if the scope is blank or
    /// contains whitespace.
    pub fn insert(&mut self, scope: impl Into<String>) -> Result<(), ConfigError> {
        let scope = scope.into();
        Self::validate(&scope)?;
        self.scopes.insert(scope);
        Ok(())
    }

    fn validate(scope: &str) -> Result<(), ConfigError> {
        if scope.is_empty() {
            return Err(ConfigError::InvalidScopes {
                reason: "scope cannot be empty".to_string(),
            });
        }
        if scope.chars().any(|c| c.is_whitespace() || c == ',') {
            return Err(ConfigError::InvalidScopes {
                reason: format!("Invalid characters in scope: '{scope}'"),
            });
        }
        Ok(())
    }
}

impl FromStr for Scopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = Self::new();
        for scope in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|scope| !scope.is_empty())
        {
            scopes.insert(scope)?;
        }
        Ok(scopes)
    }
}

impl<S: Into<String>> FromIterator<S> for Scopes {
    /// Collects scopes, silently dropping blank entries.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let scopes = iter
            .into_iter()
            .map(|s| s.into().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { scopes }
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scopes: Vec<&str> = self.iter().collect();
        f.write_str(&scopes.join(" "))
    }
}

impl Serialize for Scopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Scopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
