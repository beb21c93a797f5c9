//! Registered-user directory with in-memory session flags.

use crate::account::{
    domain::{AccountDomainError, EmailAddress, Password, UserAccount},
    ports::{AccountRepository, AccountRepositoryError, SessionError, SessionGate},
};
use crate::error::ErrorKind;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),

    /// The email is already registered.
    #[error("email already exists: {0}")]
    AlreadyRegistered(EmailAddress),

    /// The email has never been registered.
    #[error("user doesn't exist: {0}")]
    UnknownUser(EmailAddress),

    /// The password does not match the stored one.
    #[error("wrong password for {0}")]
    WrongPassword(EmailAddress),

    /// The user already holds a session.
    #[error("user is already logged in: {0}")]
    AlreadyLoggedIn(EmailAddress),

    /// The user holds no session.
    #[error("user is not logged in: {0}")]
    NotLoggedIn(EmailAddress),

    /// Reading or clearing stored accounts failed.
    #[error(transparent)]
    Repository(#[from] AccountRepositoryError),
}

impl AccountError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::AlreadyRegistered(_) | Self::AlreadyLoggedIn(_) | Self::NotLoggedIn(_) => {
                ErrorKind::State
            }
            Self::UnknownUser(_) => ErrorKind::NotFound,
            Self::WrongPassword(_) => ErrorKind::Authorization,
            Self::Repository(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug)]
struct Session {
    account: UserAccount,
    logged_in: bool,
}

/// Registers users, tracks who is logged in and answers the board
/// registry's [`SessionGate`] queries.
///
/// Login flags are never persisted: after [`AccountService::load_data`]
/// every user is logged out.
#[derive(Debug)]
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    sessions: RwLock<BTreeMap<EmailAddress, Session>>,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Creates an empty directory over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            sessions: RwLock::new(BTreeMap::new()),
        }
    }

    fn read_sessions(&self) -> RwLockReadGuard<'_, BTreeMap<EmailAddress, Session>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_sessions(&self) -> RwLockWriteGuard<'_, BTreeMap<EmailAddress, Session>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new user and logs them in.
    ///
    /// A failed `Users` insert is logged and does not undo the registration.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for an invalid email or password and
    /// [`AccountError::AlreadyRegistered`] for a known email.
    pub fn register(&self, raw_email: &str, raw_password: &str) -> AccountResult<EmailAddress> {
        let email = EmailAddress::new(raw_email)?;
        let password = Password::new(raw_password)?;

        let mut sessions = self.write_sessions();
        if sessions.contains_key(&email) {
            return Err(AccountError::AlreadyRegistered(email));
        }

        let account = UserAccount::new(email.clone(), password);
        if let Err(err) = self.repository.store(&account) {
            tracing::warn!(%email, error = %err, "failed to persist registered user");
        }
        sessions.insert(
            email.clone(),
            Session {
                account,
                logged_in: true,
            },
        );
        tracing::info!(%email, "user registered");
        Ok(email)
    }

    /// Logs a registered user in.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UnknownUser`], [`AccountError::WrongPassword`]
    /// or [`AccountError::AlreadyLoggedIn`].
    pub fn login(&self, raw_email: &str, password: &str) -> AccountResult<EmailAddress> {
        let email = EmailAddress::new(raw_email)?;
        let mut sessions = self.write_sessions();
        let session = sessions
            .get_mut(&email)
            .ok_or_else(|| AccountError::UnknownUser(email.clone()))?;

        if !session.account.password().matches(password) {
            return Err(AccountError::WrongPassword(email));
        }
        if session.logged_in {
            return Err(AccountError::AlreadyLoggedIn(email));
        }
        session.logged_in = true;
        Ok(email)
    }

    /// Logs a user out.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UnknownUser`] or [`AccountError::NotLoggedIn`].
    pub fn logout(&self, raw_email: &str) -> AccountResult<()> {
        let email = EmailAddress::new(raw_email)?;
        let mut sessions = self.write_sessions();
        let session = sessions
            .get_mut(&email)
            .ok_or_else(|| AccountError::UnknownUser(email.clone()))?;
        if !session.logged_in {
            return Err(AccountError::NotLoggedIn(email));
        }
        session.logged_in = false;
        Ok(())
    }

    /// Returns whether `email` has been registered.
    #[must_use]
    pub fn is_registered(&self, email: &EmailAddress) -> bool {
        self.read_sessions().contains_key(email)
    }

    /// Replaces the directory with the accounts stored in the repository.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when the accounts cannot be read.
    pub fn load_data(&self) -> AccountResult<usize> {
        let accounts = self.repository.list_all()?;
        let mut sessions = self.write_sessions();
        sessions.clear();
        for account in accounts {
            sessions.insert(
                account.email().clone(),
                Session {
                    account,
                    logged_in: false,
                },
            );
        }
        tracing::info!(users = sessions.len(), "accounts loaded");
        Ok(sessions.len())
    }

    /// Deletes every stored account and forgets every session.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when the rows cannot be deleted.
    pub fn delete_data(&self) -> AccountResult<()> {
        self.repository.clear()?;
        self.write_sessions().clear();
        Ok(())
    }
}

impl<R> SessionGate for AccountService<R>
where
    R: AccountRepository,
{
    fn is_logged_in(&self, email: &EmailAddress) -> Result<bool, SessionError> {
        self.read_sessions()
            .get(email)
            .map(|session| session.logged_in)
            .ok_or_else(|| SessionError::UnknownUser(email.clone()))
    }
}
