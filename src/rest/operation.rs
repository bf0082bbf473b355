//! Long-running operations.
//!
//! Methods that start slow work return an [`Operation`]: a named handle that
//! is either still pending or finished with exactly one of a result or an
//! error [`Status`]. The invariant is enforced when the record is decoded, so
//! an `Operation` value can never be done with both or neither.
//!
//! [`OperationPoller`] re-issues a get-operation request until the operation
//! is done. Once it has seen a terminal state it stops calling the server and
//! hands back the same state on every later poll.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! let mut poller = checks.accounts().apps().operations().poller(name);
//! let operation = poller.until_done(Duration::from_secs(2), 30).await?;
//!
//! match operation.state {
//!     OperationState::Succeeded(result) => println!("result: {result:?}"),
//!     OperationState::Failed(status) => println!("failed: {status}"),
//!     OperationState::Pending => unreachable!(),
//! }
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::rest::errors::Failure;
use crate::rest::record::{impl_record, Nullable};
use crate::rest::request::Request;

/// The error result of an operation, in the `google.rpc.Status` shape.
#[derive(Clone, Debug, Default, PartialEq, Error, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct Status {
    /// The status code, a `google.rpc.Code` value.
    #[serde(default)]
    pub code: i32,
    /// Developer-facing error message.
    #[serde(default)]
    pub message: String,
    /// Detail records, kept verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Value>,
    /// The version tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Fields a newer server might add.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_record!(Status);

/// Where an operation stands.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OperationState {
    /// Still running.
    #[default]
    Pending,
    /// Finished; carries the result record.
    Succeeded(Map<String, Value>),
    /// Finished; carries the error.
    Failed(Status),
}

impl OperationState {
    /// Returns `true` for `Succeeded` and `Failed`.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Why an operation record was rejected while decoding.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OperationStateError {
    /// `done` is false but a result or error is present.
    #[error("operation is not done but carries a result or an error")]
    OutcomeWhilePending,
    /// `done` is true and both a result and an error are present.
    #[error("operation is done with both a result and an error")]
    BothOutcomes,
    /// `done` is true and neither a result nor an error is present.
    #[error("operation is done with neither a result nor an error")]
    NoOutcome,
}

/// A long-running operation.
///
/// # Example
///
/// ```rust
/// use discovery_client::rest::{Operation, OperationState};
///
/// let op: Operation = serde_json::from_str(
///     r#"{"name": "accounts/1/apps/2/operations/3", "done": true, "response": {"ok": 1}}"#,
/// )
/// .unwrap();
/// assert!(op.is_done());
/// assert!(matches!(op.state, OperationState::Succeeded(_)));
///
/// let bad = serde_json::from_str::<Operation>(r#"{"name": "x", "done": true}"#);
/// assert!(bad.is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOperation", into = "RawOperation")]
pub struct Operation {
    /// Server-assigned name, e.g. `accounts/1/apps/2/operations/3`.
    pub name: String,
    /// Service-specific progress metadata.
    pub metadata: Nullable<Map<String, Value>>,
    /// Pending, or the outcome.
    pub state: OperationState,
    /// The version tag.
    pub etag: Option<String>,
    /// Fields a newer server might add.
    pub extra: Map<String, Value>,
}

impl Operation {
    /// Returns `true` once the operation has an outcome.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Returns the result record, if the operation succeeded.
    #[must_use]
    pub const fn result(&self) -> Option<&Map<String, Value>> {
        match &self.state {
            OperationState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Returns the error, if the operation failed.
    #[must_use]
    pub const fn error(&self) -> Option<&Status> {
        match &self.state {
            OperationState::Failed(status) => Some(status),
            _ => None,
        }
    }

    /// Decodes the result record into a typed value.
    ///
    /// Returns `None` unless the operation succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::Decode`] if the result does not fit `R`.
    pub fn result_as<R: DeserializeOwned>(&self) -> Option<Result<R, Failure>> {
        self.result().map(|result| {
            serde_json::from_value(Value::Object(result.clone())).map_err(|source| {
                Failure::Decode {
                    type_name: std::any::type_name::<R>(),
                    source,
                }
            })
        })
    }
}

impl_record!(Operation);

/// Wire form of [`Operation`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOperation {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    metadata: Nullable<Map<String, Value>>,
    #[serde(default)]
    done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawOperation> for Operation {
    type Error = OperationStateError;

    fn try_from(raw: RawOperation) -> Result<Self, Self::Error> {
        let state = match (raw.done, raw.response, raw.error) {
            (false, None, None) => OperationState::Pending,
            (false, _, _) => return Err(OperationStateError::OutcomeWhilePending),
            (true, Some(_), Some(_)) => return Err(OperationStateError::BothOutcomes),
            (true, None, None) => return Err(OperationStateError::NoOutcome),
            (true, Some(response), None) => OperationState::Succeeded(response),
            (true, None, Some(error)) => OperationState::Failed(error),
        };

        Ok(Self {
            name: raw.name,
            metadata: raw.metadata,
            state,
            etag: raw.etag,
            extra: raw.extra,
        })
    }
}

impl From<Operation> for RawOperation {
    fn from(operation: Operation) -> Self {
        let (done, response, error) = match operation.state {
            OperationState::Pending => (false, None, None),
            OperationState::Succeeded(response) => (true, Some(response), None),
            OperationState::Failed(status) => (true, None, Some(status)),
        };

        Self {
            name: operation.name,
            metadata: operation.metadata,
            done,
            response,
            error,
            etag: operation.etag,
            extra: operation.extra,
        }
    }
}

/// Polls a get-operation request until the operation is done.
///
/// The poller owns the request and clones it for every poll. After the
/// first terminal response it never sends another request.
#[derive(Debug)]
pub struct OperationPoller {
    request: Request<Operation>,
    terminal: Option<Operation>,
    polls: u32,
}

impl OperationPoller {
    /// Wraps a get-operation request.
    #[must_use]
    pub const fn new(request: Request<Operation>) -> Self {
        Self {
            request,
            terminal: None,
            polls: 0,
        }
    }

    /// Returns how many requests have been sent, including those that failed.
    #[must_use]
    pub const fn polls(&self) -> u32 {
        self.polls
    }

    /// Returns the cached terminal state, if one has been seen.
    #[must_use]
    pub const fn terminal(&self) -> Option<&Operation> {
        self.terminal.as_ref()
    }

    /// Fetches the operation once, or returns the cached terminal state.
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] of the underlying request. Failures are not
    /// cached; the next poll tries again.
    pub async fn poll(&mut self) -> Result<Operation, Failure> {
        if let Some(operation) = &self.terminal {
            tracing::trace!("Operation {} already done", operation.name);
            return Ok(operation.clone());
        }

        let result = self.request.clone().execute().await;
        if !matches!(result, Err(Failure::Validation(_))) {
            self.polls += 1;
        }
        let operation = result?;
        tracing::trace!(
            "Polled operation {} (poll {}, done: {})",
            operation.name,
            self.polls,
            operation.is_done()
        );

        if operation.is_done() {
            self.terminal = Some(operation.clone());
        }
        Ok(operation)
    }

    /// Polls until the operation is done, sleeping `interval` between polls.
    ///
    /// At most `max_polls` requests are sent by this call; at least one is
    /// sent unless a terminal state is already cached.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::NotDone`] if the operation is still pending after
    /// `max_polls` polls, or the first request failure.
    pub async fn until_done(
        &mut self,
        interval: Duration,
        max_polls: u32,
    ) -> Result<Operation, Failure> {
        let mut sent = 0;
        loop {
            let operation = self.poll().await?;
            if operation.is_done() {
                return Ok(operation);
            }
            sent += 1;
            if sent >= max_polls {
                return Err(Failure::NotDone {
                    name: operation.name,
                    polls: sent,
                });
            }
            tokio::time::sleep(interval).await;
        }
    }
}
