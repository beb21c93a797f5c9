//! SQLite repository implementation for registered accounts.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::account::{
    domain::{EmailAddress, Password, UserAccount},
    ports::{AccountRepository, AccountRepositoryError, AccountRepositoryResult},
};
use crate::storage::SqlitePool;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;

/// SQLite-backed account repository.
#[derive(Debug, Clone)]
pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    /// Creates a repository over an open connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> AccountRepositoryResult<T>,
    ) -> AccountRepositoryResult<T> {
        let mut connection = self
            .pool
            .get()
            .map_err(AccountRepositoryError::persistence)?;
        f(&mut connection)
    }
}

impl AccountRepository for SqliteAccountRepository {
    fn store(&self, account: &UserAccount) -> AccountRepositoryResult<()> {
        let row = NewUserRow {
            email: account.email().as_str(),
            password: account.password().expose(),
        };
        self.with_connection(|connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AccountRepositoryError::DuplicateAccount(account.email().clone())
                    }
                    _ => AccountRepositoryError::persistence(err),
                })?;
            Ok(())
        })
    }

    fn list_all(&self) -> AccountRepositoryResult<Vec<UserAccount>> {
        let rows = self.with_connection(|connection| {
            diesel::sql_query(
                "SELECT Email AS email, Password AS password FROM Users ORDER BY rowid",
            )
            .load::<UserRow>(connection)
            .map_err(AccountRepositoryError::persistence)
        })?;
        rows.into_iter().map(row_to_account).collect()
    }

    fn clear(&self) -> AccountRepositoryResult<()> {
        self.with_connection(|connection| {
            diesel::delete(users::table)
                .execute(connection)
                .map_err(AccountRepositoryError::persistence)?;
            Ok(())
        })
    }
}

fn row_to_account(row: UserRow) -> AccountRepositoryResult<UserAccount> {
    let UserRow {
        email: raw_email,
        password,
    } = row;
    let email = EmailAddress::new(raw_email.as_str())
        .map_err(|err| AccountRepositoryError::CorruptRow(err.to_string()))?;
    Ok(UserAccount::new(email, Password::from_persisted(password)))
}
