//! The REST client model: service → resource tree → request → typed record.
//!
//! This module provides the generic machinery every API client is built on:
//!
//! - **[`Service`]**: an API bound to a configuration and a transport
//! - **[`ServiceDescriptor`] / [`ResourceDescriptor`] / [`MethodDescriptor`]**:
//!   the static description of the API surface
//! - **[`Resource`]**: a borrowed view of a resource for navigation and
//!   request creation
//! - **[`Request<T>`]**: parameter binding, validation, assembly and execution
//! - **[`Record`]**: the trait response records implement
//! - **[`Operation`] / [`OperationPoller`]**: long-running operations
//! - **[`Failure`]**: the single error type returned by execution
//!
//! # Example
//!
//! ```rust,ignore
//! use discovery_client::rest::{DynamicRecord, Service};
//!
//! let service = Service::from_discovery_json(&document, config)?;
//! let apps = service
//!     .resource_at("accounts.apps")
//!     .unwrap()
//!     .request::<DynamicRecord>("get")?
//!     .param("name", "accounts/123/apps/456")
//!     .execute()
//!     .await?;
//! println!("{:?}", apps.get("title"));
//! ```

mod errors;
mod method;
mod operation;
mod param;
mod path;
mod record;
mod request;
mod resource;
mod response;
mod service;

pub use errors::{Failure, RemoteError, ValidationError};
pub use method::{MethodDescriptor, MethodDescriptorBuilder};
pub use operation::{Operation, OperationPoller, OperationState, OperationStateError, Status};
pub use param::{
    is_standard_parameter, ParamDescriptor, ParamKind, ParamValue, Pattern, Requirement,
    STANDARD_PARAMETERS,
};
pub use path::PathTemplate;
pub use record::{DynamicRecord, Empty, Nullable, Record};
pub(crate) use record::impl_record;
pub use request::Request;
pub use resource::{Resource, ResourceDescriptor};
pub use response::Response;
pub use service::{Service, ServiceDescriptor, ServiceDescriptorBuilder};
