//! Repository port for registered user accounts (the `Users` table).

use crate::account::domain::{EmailAddress, UserAccount};
use std::sync::Arc;
use thiserror::Error;

/// Result type for account repository operations.
pub type AccountRepositoryResult<T> = Result<T, AccountRepositoryError>;

/// Account persistence contract.
#[cfg_attr(test, mockall::automock)]
pub trait AccountRepository: Send + Sync {
    /// Stores a newly registered account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountRepositoryError::DuplicateAccount`] when the email is
    /// already stored.
    fn store(&self, account: &UserAccount) -> AccountRepositoryResult<()>;

    /// Returns every stored account in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AccountRepositoryError::Persistence`] when reading fails.
    fn list_all(&self) -> AccountRepositoryResult<Vec<UserAccount>>;

    /// Deletes every stored account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountRepositoryError::Persistence`] when deletion fails.
    fn clear(&self) -> AccountRepositoryResult<()>;
}

/// Errors returned by account repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AccountRepositoryError {
    /// An account with the same email already exists.
    #[error("duplicate account: {0}")]
    DuplicateAccount(EmailAddress),

    /// A stored row could not be turned back into an account.
    #[error("corrupt account row: {0}")]
    CorruptRow(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccountRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
