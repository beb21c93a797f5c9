//! Uniform response envelope returned by the [`crate::KanbanSystem`] facade.
//!
//! Every operation answers with an object that carries either an
//! `ErrorMessage` or a `ReturnValue` (or neither, for a successful operation
//! without a result):
//!
//! ```
//! use kanban::envelope::Response;
//!
//! let ok = Response::ok(7_u64);
//! assert_eq!(ok.to_json().ok().as_deref(), Some(r#"{"ReturnValue":7}"#));
//!
//! let empty = Response::<()>::empty();
//! assert_eq!(empty.to_json().ok().as_deref(), Some("{}"));
//! ```

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};

/// Outcome of one facade operation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response<T> {
    /// Failure description; absent on success.
    #[serde(
        rename = "ErrorMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<String>,

    /// Failure classification; absent on success.
    #[serde(rename = "ErrorKind", default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    /// Result value; absent on failure and for operations without a result.
    #[serde(rename = "ReturnValue", default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<T>,
}

impl<T> Response<T> {
    /// Creates a successful response carrying `value`.
    pub const fn ok(value: T) -> Self {
        Self {
            error_message: None,
            error_kind: None,
            return_value: Some(value),
        }
    }

    /// Creates a successful response without a value.
    pub const fn empty() -> Self {
        Self {
            error_message: None,
            error_kind: None,
            return_value: None,
        }
    }

    /// Creates a failed response.
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            error_kind: Some(kind),
            return_value: None,
        }
    }

    /// Returns whether the response describes a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}

impl<T: Serialize> Response<T> {
    /// Serialises the response as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the value cannot be serialised.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
