//! # Discovery REST Client
//!
//! A Rust core for machine-described REST APIs: a service descriptor, a tree
//! of resources, one request builder per invocation, and a typed record or a
//! structured failure at the end.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for credentials and the API root URL
//! - Credential placement in the `key`, `access_token` or `oauth_token`
//!   query slots or the `Authorization` header
//! - Service, resource and method descriptors validated at construction
//! - Request builders that validate every parameter before any network call
//! - Forward-compatible records that keep unknown fields
//! - Long-running operation polling
//! - Services loaded at runtime from a discovery document
//! - A hand-declared client for the Checks API operations surface
//!
//! ## Quick Start
//!
//! ```rust
//! use discovery_client::{ApiKey, ClientConfig, Credentials};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .credentials(Credentials::ApiKey(ApiKey::new("your-api-key").unwrap()))
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Calling a Method
//!
//! ```rust,ignore
//! use discovery_client::services::checks_v1alpha::Checks;
//!
//! let checks = Checks::new(config)?;
//! let operation = checks
//!     .accounts()
//!     .apps()
//!     .operations()
//!     .get("accounts/123/apps/456/operations/789")
//!     .execute()
//!     .await?;
//!
//! if operation.is_done() {
//!     println!("{:?}", operation.result());
//! }
//! ```
//!
//! ## Handling Failures
//!
//! ```rust,ignore
//! use discovery_client::rest::Failure;
//!
//! match request.execute().await {
//!     Ok(record) => { /* ... */ }
//!     Err(Failure::Validation(e)) => eprintln!("not sent: {e}"),
//!     Err(Failure::Remote(e)) => eprintln!("server said {}: {}", e.code, e.message),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Runtime Services
//!
//! ```rust,ignore
//! use discovery_client::rest::{DynamicRecord, Service};
//!
//! let service = Service::from_discovery_json(&document_json, config)?;
//! let record: DynamicRecord = service
//!     .resource_at("accounts.apps")
//!     .unwrap()
//!     .request("get")?
//!     .param("name", "accounts/123/apps/456")
//!     .execute()
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and descriptors validate on construction
//! - **Thread-safe**: Services and descriptors are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **No hidden retries**: Every execution sends at most one request

pub mod auth;
pub mod clients;
pub mod config;
pub mod discovery;
pub mod error;
pub mod rest;
pub mod services;

// Re-export public types at crate root for convenience
pub use auth::{CredentialSlot, Credentials, Scopes};
pub use config::{AccessToken, ApiKey, ClientConfig, ClientConfigBuilder, RootUrl};
pub use error::ConfigError;

// Re-export HTTP transport types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, Transport,
};

// Re-export the request model
pub use rest::{Failure, Operation, Record, RemoteError, Request, Response, Service, ValidationError};
