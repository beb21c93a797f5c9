//! SQLite connection pool and schema bootstrap.

use super::{StorageError, StoreConfig};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

/// SQLite connection pool shared by every row-store adapter.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Tables of the row store, created idempotently on startup.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Boards (
    Id INTEGER PRIMARY KEY,
    Name TEXT NOT NULL,
    OwnerEmail TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS BoardMembers (
    BoardID INTEGER NOT NULL,
    Email TEXT NOT NULL,
    PRIMARY KEY (BoardID, Email)
);

CREATE TABLE IF NOT EXISTS Columns (
    BoardID INTEGER NOT NULL,
    Ordinal INTEGER NOT NULL,
    TasksLimit INTEGER NOT NULL,
    PRIMARY KEY (BoardID, Ordinal)
);

CREATE TABLE IF NOT EXISTS Tasks (
    BoardID INTEGER NOT NULL,
    Ordinal INTEGER NOT NULL,
    TaskId INTEGER NOT NULL,
    AssigneeEmail TEXT NOT NULL,
    Title TEXT NOT NULL,
    Description TEXT NOT NULL,
    DueDate TEXT NOT NULL,
    CreationTime TEXT NOT NULL,
    PRIMARY KEY (BoardID, Ordinal, TaskId)
);

CREATE TABLE IF NOT EXISTS Users (
    Email TEXT PRIMARY KEY,
    Password TEXT NOT NULL
);
";

/// Opens a connection pool for `config` and makes sure the schema exists.
///
/// # Errors
///
/// Returns [`StorageError::Pool`] when no connection can be established and
/// [`StorageError::Schema`] when the tables cannot be created.
pub fn open_pool(config: &StoreConfig) -> Result<SqlitePool, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.as_str());
    let mut builder = Pool::builder().max_size(config.pool_size);
    if config.is_in_memory() {
        // Dropping the only connection would discard the database.
        builder = builder.idle_timeout(None).max_lifetime(None);
    }
    let pool = builder.build(manager)?;

    let mut connection = pool.get()?;
    ensure_schema(&mut connection)?;
    tracing::debug!(database_url = %config.database_url, "row store schema ready");
    Ok(pool)
}

/// Creates any missing table on `connection`.
///
/// # Errors
///
/// Returns [`StorageError::Schema`] when a statement fails.
pub fn ensure_schema(connection: &mut SqliteConnection) -> Result<(), StorageError> {
    connection
        .batch_execute(SCHEMA)
        .map_err(StorageError::Schema)
}
