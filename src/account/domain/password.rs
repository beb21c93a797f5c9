//! Password policy value object.

use super::AccountDomainError;
use std::fmt;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 20;

/// Password that satisfies the account policy.
///
/// The policy requires 6 to 20 characters including at least one upper-case
/// letter, one lower-case letter and one digit.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validates a password against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InvalidPassword`] when the length or
    /// character classes are not satisfied.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let text = value.into();
        let length = text.chars().count();
        let has_upper = text.chars().any(char::is_uppercase);
        let has_lower = text.chars().any(char::is_lowercase);
        let has_digit = text.chars().any(|c| c.is_ascii_digit());

        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length)
            || !has_upper
            || !has_lower
            || !has_digit
        {
            return Err(AccountDomainError::InvalidPassword {
                min: MIN_PASSWORD_LENGTH,
                max: MAX_PASSWORD_LENGTH,
            });
        }

        Ok(Self(text))
    }

    /// Restores a password read back from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the password text for persistence.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Compares a login attempt against this password.
    #[must_use]
    pub fn matches(&self, attempt: &str) -> bool {
        self.0 == attempt
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}
