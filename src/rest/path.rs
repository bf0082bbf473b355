//! Path templates for REST methods.
//!
//! Every method has a fixed template such as `v1alpha/{+name}:cancel`.
//! Placeholders come in two flavours:
//!
//! - `{param}` - simple expansion, every character outside the unreserved set
//!   is percent-encoded (a `/` becomes `%2F`)
//! - `{+param}` - reserved expansion, `/` separators are kept and each
//!   segment between them is percent-encoded
//!
//! # Example
//!
//! ```rust
//! use discovery_client::rest::PathTemplate;
//! use std::collections::HashMap;
//!
//! let template = PathTemplate::parse("v1alpha/{+name}").unwrap();
//! assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["name"]);
//!
//! let mut values = HashMap::new();
//! values.insert("name", "accounts/123/apps/456/operations/789");
//! assert_eq!(
//!     template.expand(&values).unwrap(),
//!     "v1alpha/accounts/123/apps/456/operations/789"
//! );
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable { name: String, reserved: bool },
}

/// A parsed path template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPathTemplate`] for unbalanced braces,
    /// empty or malformed placeholder names, or a placeholder used twice.
    pub fn parse(template: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidPathTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        let mut rest = template;

        while let Some(open) = rest.find(['{', '}']) {
            if rest.as_bytes()[open] == b'}' {
                return Err(invalid("'}' without matching '{'"));
            }
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }

            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid("unclosed placeholder"))?;
            let inner = &after[..close];
            if inner.contains('{') {
                return Err(invalid("nested placeholder"));
            }

            let (name, reserved) = inner
                .strip_prefix('+')
                .map_or((inner, false), |name| (name, true));
            if name.is_empty()
                || !name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
            {
                return Err(invalid(&format!("invalid placeholder '{inner}'")));
            }
            if !seen.insert(name.to_string()) {
                return Err(invalid(&format!("placeholder '{name}' appears twice")));
            }

            segments.push(Segment::Variable {
                name: name.to_string(),
                reserved,
            });
            rest = &after[close + 1..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// Returns the template as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns the placeholder names in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes every placeholder, percent-encoding the values.
    ///
    /// # Errors
    ///
    /// Returns the name of the first placeholder with no value.
    pub fn expand(&self, values: &HashMap<&str, &str>) -> Result<String, String> {
        let mut path = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Variable { name, reserved } => {
                    let value = values
                        .get(name.as_str())
                        .ok_or_else(|| name.clone())?;
                    if *reserved {
                        let encoded: Vec<_> =
                            value.split('/').map(urlencoding::encode).collect();
                        path.push_str(&encoded.join("/"));
                    } else {
                        path.push_str(&urlencoding::encode(value));
                    }
                }
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_collects_placeholders_in_order() {
        let template =
            PathTemplate::parse("v1/projects/{projectId}/zones/{zone}/instances").unwrap();
        assert_eq!(
            template.placeholders().collect::<Vec<_>>(),
            vec!["projectId", "zone"]
        );
    }

    #[test]
    fn test_parse_template_without_placeholders() {
        let template = PathTemplate::parse("v1/things").unwrap();
        assert_eq!(template.placeholders().count(), 0);
        assert_eq!(template.expand(&HashMap::new()).unwrap(), "v1/things");
    }

    #[test]
    fn test_parse_rejects_malformed_templates() {
        assert!(PathTemplate::parse("v1/{name").is_err());
        assert!(PathTemplate::parse("v1/name}").is_err());
        assert!(PathTemplate::parse("v1/{}").is_err());
        assert!(PathTemplate::parse("v1/{+}").is_err());
        assert!(PathTemplate::parse("v1/{a{b}}").is_err());
        assert!(PathTemplate::parse("v1/{a b}").is_err());
        assert!(PathTemplate::parse("v1/{a}/{a}").is_err());
    }

    #[test]
    fn test_reserved_expansion_keeps_slashes() {
        let template = PathTemplate::parse("v1alpha/{+name}:cancel").unwrap();
        let path = template
            .expand(&values(&[("name", "accounts/1/apps/2/operations/3")]))
            .unwrap();
        assert_eq!(path, "v1alpha/accounts/1/apps/2/operations/3:cancel");
    }

    #[test]
    fn test_simple_expansion_encodes_slashes() {
        let template = PathTemplate::parse("v1/files/{fileId}").unwrap();
        let path = template.expand(&values(&[("fileId", "a/b c")])).unwrap();
        assert_eq!(path, "v1/files/a%2Fb%20c");
    }

    #[test]
    fn test_reserved_expansion_encodes_within_segments() {
        let template = PathTemplate::parse("v1/{+name}").unwrap();
        let path = template
            .expand(&values(&[("name", "buckets/my bucket/objects/ä")]))
            .unwrap();
        assert_eq!(path, "v1/buckets/my%20bucket/objects/%C3%A4");
    }

    #[test]
    fn test_expand_reports_missing_placeholder() {
        let template = PathTemplate::parse("v1/{a}/{b}").unwrap();
        let result = template.expand(&values(&[("a", "x")]));
        assert_eq!(result, Err("b".to_string()));
    }
}
