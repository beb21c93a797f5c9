//! In-memory account repository for tests and ephemeral systems.

use std::sync::{Arc, RwLock};

use crate::account::{
    domain::UserAccount,
    ports::{AccountRepository, AccountRepositoryError, AccountRepositoryResult},
};

/// Thread-safe in-memory account repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<Vec<UserAccount>>>,
}

impl InMemoryAccountRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> AccountRepositoryError {
    AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl AccountRepository for InMemoryAccountRepository {
    fn store(&self, account: &UserAccount) -> AccountRepositoryResult<()> {
        let mut accounts = self.accounts.write().map_err(lock_error)?;
        if accounts.iter().any(|stored| stored.email() == account.email()) {
            return Err(AccountRepositoryError::DuplicateAccount(
                account.email().clone(),
            ));
        }
        accounts.push(account.clone());
        Ok(())
    }

    fn list_all(&self) -> AccountRepositoryResult<Vec<UserAccount>> {
        let accounts = self.accounts.read().map_err(lock_error)?;
        Ok(accounts.clone())
    }

    fn clear(&self) -> AccountRepositoryResult<()> {
        self.accounts.write().map_err(lock_error)?.clear();
        Ok(())
    }
}
