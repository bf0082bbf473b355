//! Service clients declared in code.
//!
//! Each submodule is one API version, shaped the way a client generator
//! emits it: constants for the API identity, a client type wrapping a
//! [`Service`](crate::rest::Service), typed resource views and records.

pub mod checks_v1alpha;
