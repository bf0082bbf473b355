//! Typed data records.
//!
//! Every response body decodes into a type implementing [`Record`]. Records
//! are plain serde structs with three conventions:
//!
//! - optional fields are `Option<T>` (or [`Nullable<T>`] when an explicit
//!   `null` means something different from an absent field)
//! - an `etag` field carries the opaque version tag
//! - a `#[serde(flatten)]` map keeps every field the struct does not declare
//!
//! # Example
//!
//! ```rust
//! use discovery_client::rest::{DynamicRecord, Record};
//!
//! let record: DynamicRecord =
//!     serde_json::from_str(r#"{"etag": "abc", "title": "Report"}"#).unwrap();
//! assert_eq!(record.etag(), Some("abc"));
//! assert_eq!(record.get("title").and_then(|v| v.as_str()), Some("Report"));
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A response record.
///
/// Implementors expose their version tag and the wire fields they did not
/// declare. The request executor fills a missing version tag from the
/// response's `ETag` header.
pub trait Record: DeserializeOwned + Send + 'static {
    /// Returns the opaque version tag, if the record has one.
    fn etag(&self) -> Option<&str>;

    /// Replaces the version tag.
    fn set_etag(&mut self, etag: String);

    /// Returns the wire fields that are not declared on the record.
    fn extra(&self) -> &Map<String, Value>;
}

/// Implements [`Record`] for a struct with `etag: Option<String>` and
/// `extra: Map<String, Value>` fields.
macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::rest::Record for $ty {
                fn etag(&self) -> Option<&str> {
                    self.etag.as_deref()
                }

                fn set_etag(&mut self, etag: String) {
                    self.etag = Some(etag);
                }

                fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
                    &self.extra
                }
            }
        )+
    };
}

pub(crate) use impl_record;

/// A field that distinguishes "absent" from "explicitly null".
///
/// Declare it with `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`
/// so that an absent field decodes to [`Nullable::Absent`] and is omitted
/// again on the way out.
///
/// # Example
///
/// ```rust
/// use discovery_client::rest::Nullable;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Patch {
///     #[serde(default)]
///     timeout: Nullable<String>,
/// }
///
/// let absent: Patch = serde_json::from_str("{}").unwrap();
/// let null: Patch = serde_json::from_str(r#"{"timeout": null}"#).unwrap();
/// let zero: Patch = serde_json::from_str(r#"{"timeout": "0s"}"#).unwrap();
///
/// assert!(absent.timeout.is_absent());
/// assert!(null.timeout.is_null());
/// assert_eq!(zero.timeout.as_option(), Some(&"0s".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nullable<T> {
    /// The field was not present.
    Absent,
    /// The field was present with a `null` value.
    Null,
    /// The field was present with a value.
    Value(T),
}

impl<T> Nullable<T> {
    /// Returns `true` if the field was not present.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if the field was an explicit `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value, if there is one.
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Converts into an `Option`, folding `Absent` and `Null` together.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Value))
    }
}

/// A record with no declared fields, used for services loaded at runtime.
///
/// Every wire field except `etag` lands in [`fields`](Self::fields).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicRecord {
    /// The version tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// All other wire fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DynamicRecord {
    /// Returns a field by wire name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Record for DynamicRecord {
    fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    fn set_etag(&mut self, etag: String) {
        self.etag = Some(etag);
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// The empty record, returned by methods such as `delete` and `cancel`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Empty {
    /// The version tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Fields a newer server might add.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_record!(Empty);
