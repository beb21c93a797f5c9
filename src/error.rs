//! Failure classification shared by every service error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a failed operation.
///
/// Callers branch on the kind instead of matching error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed, oversized or blank input, or an invalid identifier.
    Validation,
    /// The caller is not allowed to perform the operation.
    Authorization,
    /// The operation conflicts with the current state.
    State,
    /// A board, column, task or user does not exist.
    NotFound,
    /// The row store could not be read or written.
    Persistence,
}

impl ErrorKind {
    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::State => "state",
            Self::NotFound => "not_found",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
