//! Error types for account domain validation.

use thiserror::Error;

/// Errors returned while constructing account domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The email address is empty after trimming.
    #[error("email cannot be empty")]
    EmptyEmail,

    /// The email address is not of the form `local@domain.tld`.
    #[error("invalid email '{0}'")]
    InvalidEmail(String),

    /// The password violates the length or character-class policy.
    #[error(
        "invalid password: expected {min}-{max} characters with upper case, lower case and a digit"
    )]
    InvalidPassword {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },
}
