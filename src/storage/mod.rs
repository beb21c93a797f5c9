//! Shared SQLite plumbing for the row-store adapters.
//!
//! Both bounded contexts persist into one database: boards, members, columns
//! and tasks from [`crate::board`], users from [`crate::account`]. This module
//! owns the connection settings, the pool and the schema bootstrap.

mod config;
mod pool;

pub use config::{
    DATABASE_URL_ENV, DEFAULT_DATABASE_URL, IN_MEMORY_DATABASE_URL, POOL_SIZE_ENV, StoreConfig,
};
pub use pool::{SqlitePool, ensure_schema, open_pool};

use thiserror::Error;

/// Errors raised while configuring or opening the row store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A configuration value is unusable.
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// No connection could be obtained from the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// The schema bootstrap failed.
    #[error("schema bootstrap failed: {0}")]
    Schema(diesel::result::Error),
}
