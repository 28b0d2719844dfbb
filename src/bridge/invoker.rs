//! The seam to the external backend.

use serde_json::{Map, Value};
use std::future::Future;
use thiserror::Error;

/// Named arguments for a command, as a JSON object.
pub type Args = Map<String, Value>;

/// Failure reported by the backend, already converted to text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InvokeError {
    message: String,
}

impl InvokeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Convert an error payload of any shape to text.
    ///
    /// Strings are taken verbatim; anything else is rendered as compact JSON.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(message) => Self::new(message),
            other => Self::new(other.to_string()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for InvokeError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for InvokeError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<serde_json::Error> for InvokeError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// Something that can run a named backend command.
///
/// Implementations forward to the host's IPC layer. The call may take any
/// amount of time and is never cancelled once started.
pub trait Invoker: Send + Sync {
    fn invoke(
        &self,
        command: &str,
        args: Args,
    ) -> impl Future<Output = Result<Value, InvokeError>> + Send;
}
