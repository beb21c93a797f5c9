//! Registered user account.

use super::{EmailAddress, Password};

/// A registered user: an email identity and its password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    email: EmailAddress,
    password: Password,
}

impl UserAccount {
    /// Creates an account from validated parts.
    #[must_use]
    pub const fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }

    /// Returns the account email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the account password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}
