//! The request builder and executor.
//!
//! A [`Request<T>`] is created by a resource factory for one invocation of
//! one method. Callers bind parameters, an optional body and extra headers,
//! then execute it. Execution consumes the request and ends in either a
//! decoded `T` or a single [`Failure`].
//!
//! # Execution
//!
//! 1. Bound values are validated against the method descriptor. Any
//!    problem is a [`Failure::Validation`] and nothing is sent.
//! 2. The path template is expanded, query parameters are emitted in name
//!    order and the configured credential is placed in its slot, unless
//!    the caller bound a credential parameter or `Authorization` header.
//! 3. The transport sends the request once.
//! 4. A non-2xx status becomes [`Failure::Remote`]; a 2xx body is decoded
//!    into `T`, with an empty body read as `{}`.
//!
//! # Example
//!
//! ```rust,ignore
//! let operation = service
//!     .resource_at("accounts.apps.operations")
//!     .unwrap()
//!     .request::<Operation>("get")?
//!     .param("name", "accounts/123/apps/456/operations/789")
//!     .param("fields", "name,done")
//!     .execute()
//!     .await?;
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::auth::{CredentialSlot, CREDENTIAL_PARAMETERS};
use crate::clients::{DataType, HttpRequest, HttpResponse};
use crate::rest::errors::{Failure, RemoteError, ValidationError};
use crate::rest::method::MethodDescriptor;
use crate::rest::param::{ParamKind, ParamValue};
use crate::rest::record::Record;
use crate::rest::response::Response;
use crate::rest::service::Service;

const AUTHORIZATION: &str = "Authorization";
const IF_MATCH: &str = "If-Match";
const QUOTA_USER: &str = "quotaUser";

/// One invocation of a REST method, decoding into `T`.
pub struct Request<T> {
    service: Service,
    method: Arc<MethodDescriptor>,
    params: BTreeMap<String, ParamValue>,
    body: Option<Value>,
    headers: BTreeMap<String, String>,
    deferred: Option<ValidationError>,
    record: PhantomData<fn() -> T>,
}

impl<T> Request<T> {
    pub(crate) const fn new(service: Service, method: Arc<MethodDescriptor>) -> Self {
        Self {
            service,
            method,
            params: BTreeMap::new(),
            body: None,
            headers: BTreeMap::new(),
            deferred: None,
            record: PhantomData,
        }
    }

    /// Returns the method this request invokes.
    #[must_use]
    pub fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    /// Returns the service this request is sent through.
    #[must_use]
    pub const fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the value bound to a parameter, if any.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Binds a single value to a parameter, replacing any earlier binding.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .insert(name.into(), ParamValue::Single(value.into()));
        self
    }

    /// Binds several values to a repeated parameter.
    #[must_use]
    pub fn param_repeated<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.insert(
            name.into(),
            ParamValue::Repeated(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// A serialization failure is reported when the request is built.
    #[must_use]
    pub fn body<B: Serialize>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => {
                self.deferred = Some(ValidationError::BodySerialization {
                    method: self.method.id().to_string(),
                    reason: e.to_string(),
                });
            }
        }
        self
    }

    /// Sets an already encoded JSON request body.
    #[must_use]
    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a request header, replacing any earlier value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Makes the request conditional on the resource's current version tag.
    #[must_use]
    pub fn if_match(self, etag: impl Into<String>) -> Self {
        self.header(IF_MATCH, etag)
    }

    /// Validates the bound values and assembles the HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter is missing, empty, unknown
    /// or does not match its pattern, or if the body does not agree with the
    /// method declaration.
    pub fn build(&self) -> Result<HttpRequest, ValidationError> {
        if let Some(error) = &self.deferred {
            return Err(error.clone());
        }

        let descriptor = self.service.descriptor();
        self.method
            .validate(&self.params, descriptor.parameters(), self.body.is_some())?;

        let path_values: HashMap<&str, &str> = self
            .method
            .params()
            .iter()
            .filter(|p| p.kind() == ParamKind::Path)
            .filter_map(|p| {
                self.params
                    .get(p.name())
                    .and_then(ParamValue::as_single)
                    .map(|value| (p.name(), value))
            })
            .collect();
        let path = self
            .method
            .path()
            .expand(&path_values)
            .map_err(|name| ValidationError::MissingParameter {
                method: self.method.id().to_string(),
                name,
            })?;

        let mut query: BTreeMap<&str, Vec<&str>> = self
            .params
            .iter()
            .filter(|(name, _)| !path_values.contains_key(name.as_str()))
            .map(|(name, value)| (name.as_str(), value.values().collect()))
            .collect();

        let mut headers = self.headers.clone();
        let config = self.service.config();

        // A credential bound by the caller replaces the configured one in every slot.
        let caller_credential = self
            .params
            .keys()
            .any(|name| CREDENTIAL_PARAMETERS.contains(&name.as_str()))
            || headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(AUTHORIZATION));
        if let (false, Some(credentials)) = (caller_credential, config.credentials()) {
            match credentials.slot() {
                CredentialSlot::Query(slot) => {
                    query.insert(slot, vec![credentials.value()]);
                }
                CredentialSlot::AuthorizationHeader => {
                    if let Some(value) = credentials.authorization_header() {
                        headers.insert(AUTHORIZATION.to_string(), value);
                    }
                }
            }
        }
        if let Some(quota_user) = config.quota_user() {
            query.entry(QUOTA_USER).or_insert_with(|| vec![quota_user]);
        }

        let url = format!("{}{}", self.service.base_uri(), path);
        let mut builder = HttpRequest::builder(self.method.http_method(), url);
        for (name, values) in query {
            for value in values {
                builder = builder.query_param(name, value);
            }
        }
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &self.body {
            builder = builder.body(body.clone()).body_type(DataType::Json);
        }

        Ok(builder.build()?)
    }
}

impl<T: Record> Request<T> {
    /// Sends the request and decodes the response body.
    ///
    /// # Errors
    ///
    /// Returns a [`Failure`] describing the first thing that went wrong.
    pub async fn execute(self) -> Result<T, Failure> {
        self.execute_with_response().await.map(Response::into_inner)
    }

    /// Sends the request and returns the decoded record with its status and headers.
    ///
    /// # Errors
    ///
    /// Returns a [`Failure`] describing the first thing that went wrong.
    pub async fn execute_with_response(self) -> Result<Response<T>, Failure> {
        let request = self.build()?;

        tracing::debug!(
            "Dispatching {} {} {}",
            self.method.id(),
            request.http_method,
            request.url
        );

        let response = self.service.transport().send(request).await?;

        if !response.is_ok() {
            let error = RemoteError::from_response(&response);
            tracing::warn!(
                "{} failed with status {}: {}",
                self.method.id(),
                error.code,
                error.message
            );
            return Err(error.into());
        }

        let data = decode::<T>(&response)?;
        Ok(Response::new(data, response.code, response.headers))
    }
}

fn decode<T: Record>(response: &HttpResponse) -> Result<T, Failure> {
    let body: &[u8] = if response.is_empty_body() {
        b"{}"
    } else {
        &response.body
    };

    let mut data: T = serde_json::from_slice(body).map_err(|source| Failure::Decode {
        type_name: std::any::type_name::<T>(),
        source,
    })?;

    if data.etag().is_none() {
        if let Some(etag) = response.etag() {
            data.set_etag(etag.to_string());
        }
    }

    Ok(data)
}

impl<T> Clone for Request<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            method: Arc::clone(&self.method),
            params: self.params.clone(),
            body: self.body.clone(),
            headers: self.headers.clone(),
            deferred: self.deferred.clone(),
            record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method.id())
            .field("params", &self.params)
            .field("body", &self.body)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::clients::HttpMethod;
    use crate::config::{AccessToken, ApiKey, ClientConfig, RootUrl};
    use crate::rest::param::ParamDescriptor;
    use crate::rest::record::DynamicRecord;
    use crate::rest::resource::ResourceDescriptor;
    use crate::rest::service::ServiceDescriptor;
    use serde_json::json;

    fn service(config: ClientConfig) -> Service {
        let get = MethodDescriptor::builder("svc.files.get", HttpMethod::Get, "v1/files/{fileId}")
            .param(ParamDescriptor::path("fileId"))
            .param(ParamDescriptor::query("tags").repeated())
            .param(ParamDescriptor::query("view"))
            .build()
            .unwrap();
        let update =
            MethodDescriptor::builder("svc.files.update", HttpMethod::Patch, "v1/files/{fileId}")
                .param(ParamDescriptor::path("fileId"))
                .request("File")
                .build()
                .unwrap();
        let files = ResourceDescriptor::new("files")
            .with_method(get)
            .unwrap()
            .with_method(update)
            .unwrap();
        let descriptor = ServiceDescriptor::builder(
            "svc",
            "v1",
            RootUrl::new("https://svc.googleapis.com/").unwrap(),
        )
        .resource(files)
        .build()
        .unwrap();
        Service::new(descriptor, config).unwrap()
    }

    fn get(service: &Service) -> Request<DynamicRecord> {
        service.resource("files").unwrap().request("get").unwrap()
    }

    #[test]
    fn test_build_expands_path_and_sorts_query() {
        let service = service(ClientConfig::default());
        let request = get(&service)
            .param("fileId", "a/b")
            .param("view", "FULL")
            .param_repeated("tags", ["x", "y"])
            .param("fields", "id")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.url, "https://svc.googleapis.com/v1/files/a%2Fb");
        assert_eq!(
            request.query,
            vec![
                ("fields".to_string(), "id".to_string()),
                ("tags".to_string(), "x".to_string()),
                ("tags".to_string(), "y".to_string()),
                ("view".to_string(), "FULL".to_string()),
            ]
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_api_key_goes_into_key_param() {
        let config = ClientConfig::builder()
            .credentials(Credentials::ApiKey(ApiKey::new("secret").unwrap()))
            .build()
            .unwrap();
        let service = service(config);

        let request = get(&service).param("fileId", "1").build().unwrap();
        assert_eq!(request.query_value("key"), Some("secret"));
        assert!(!request.headers.contains_key("Authorization"));

        let request = get(&service)
            .param("fileId", "1")
            .param("key", "override")
            .build()
            .unwrap();
        assert_eq!(request.query_value("key"), Some("override"));
    }

    #[test]
    fn test_bearer_token_goes_into_header() {
        let config = ClientConfig::builder()
            .credentials(Credentials::BearerToken(AccessToken::new("tok").unwrap()))
            .quota_user("team-a")
            .build()
            .unwrap();
        let service = service(config);

        let request = get(&service).param("fileId", "1").build().unwrap();
        assert_eq!(
            request.headers.get("Authorization"),
            Some(&"Bearer tok".to_string())
        );
        assert_eq!(request.query_value("quotaUser"), Some("team-a"));
        assert_eq!(request.query_value("access_token"), None);

        let request = get(&service)
            .param("fileId", "1")
            .header("authorization", "Bearer mine")
            .build()
            .unwrap();
        assert_eq!(
            request.headers.get("authorization"),
            Some(&"Bearer mine".to_string())
        );
        assert!(!request.headers.contains_key("Authorization"));
    }

    #[test]
    fn test_caller_credential_suppresses_configured_one() {
        let config = ClientConfig::builder()
            .credentials(Credentials::BearerToken(AccessToken::new("configured").unwrap()))
            .build()
            .unwrap();
        let service = service(config);

        let request = get(&service)
            .param("fileId", "1")
            .param("access_token", "caller")
            .build()
            .unwrap();
        assert_eq!(request.query_value("access_token"), Some("caller"));
        assert!(request.headers.is_empty());

        let config = ClientConfig::builder()
            .credentials(Credentials::ApiKey(ApiKey::new("configured").unwrap()))
            .build()
            .unwrap();
        let service = self::service(config);

        let request = get(&service)
            .param("fileId", "1")
            .header("Authorization", "Bearer caller")
            .build()
            .unwrap();
        assert_eq!(request.query_value("key"), None);
        assert_eq!(
            request.headers.get("Authorization"),
            Some(&"Bearer caller".to_string())
        );
    }

    #[test]
    fn test_body_and_if_match() {
        let service = service(ClientConfig::default());
        let request = service
            .resource("files")
            .unwrap()
            .request::<DynamicRecord>("update")
            .unwrap()
            .param("fileId", "1")
            .body(&json!({"title": "new"}))
            .if_match("\"v3\"")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Patch);
        assert_eq!(request.body, Some(json!({"title": "new"})));
        assert_eq!(request.body_type, Some(DataType::Json));
        assert_eq!(request.headers.get("If-Match"), Some(&"\"v3\"".to_string()));
    }

    #[test]
    fn test_missing_body_fails_validation() {
        let service = service(ClientConfig::default());
        let result = service
            .resource("files")
            .unwrap()
            .request::<DynamicRecord>("update")
            .unwrap()
            .param("fileId", "1")
            .build();
        assert!(matches!(result, Err(ValidationError::MissingBody { .. })));
    }

    #[test]
    fn test_unknown_method() {
        let service = service(ClientConfig::default());
        let result = service
            .resource("files")
            .unwrap()
            .request::<DynamicRecord>("copy");
        assert!(matches!(
            result,
            Err(ValidationError::UnknownMethod { resource, method })
                if resource == "files" && method == "copy"
        ));
    }

    #[test]
    fn test_clone_keeps_bindings() {
        let service = service(ClientConfig::default());
        let request = get(&service).param("fileId", "1");
        let copy = request.clone();
        assert_eq!(copy.param_value("fileId"), request.param_value("fileId"));
        assert_eq!(copy.build().unwrap(), request.build().unwrap());
    }

    #[test]
    fn test_decode_reads_empty_body_as_object_and_fills_etag() {
        let mut headers = HashMap::new();
        headers.insert("etag".to_string(), vec!["\"h1\"".to_string()]);
        let response = HttpResponse::new(200, headers, Vec::new());

        let record: DynamicRecord = decode(&response).unwrap();
        assert_eq!(record.etag.as_deref(), Some("\"h1\""));
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_decode_prefers_body_etag() {
        let mut headers = HashMap::new();
        headers.insert("etag".to_string(), vec!["\"header\"".to_string()]);
        let response = HttpResponse::new(200, headers, br#"{"etag":"body"}"#.to_vec());

        let record: DynamicRecord = decode(&response).unwrap();
        assert_eq!(record.etag.as_deref(), Some("body"));
    }

    #[test]
    fn test_decode_failure_names_the_type() {
        let response = HttpResponse::new(200, HashMap::new(), b"[1, 2]".to_vec());
        let result: Result<DynamicRecord, _> = decode(&response);
        assert!(matches!(
            result,
            Err(Failure::Decode { type_name, .. }) if type_name.ends_with("DynamicRecord")
        ));
    }
}
