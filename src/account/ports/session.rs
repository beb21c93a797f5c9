//! Session gate consumed by the board registry before mutating calls.

use crate::account::domain::EmailAddress;
use thiserror::Error;

/// Answers whether a user currently holds a session.
pub trait SessionGate: Send + Sync {
    /// Reports whether `email` is logged in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownUser`] when `email` was never
    /// registered.
    fn is_logged_in(&self, email: &EmailAddress) -> Result<bool, SessionError>;
}

/// Errors returned by session gates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The email has never been registered.
    #[error("user doesn't exist: {0}")]
    UnknownUser(EmailAddress),
}
