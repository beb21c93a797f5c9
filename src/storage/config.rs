//! Row-store connection settings.

use super::StorageError;
use std::env;

/// Environment variable naming the SQLite database.
pub const DATABASE_URL_ENV: &str = "KANBAN_DATABASE_URL";

/// Environment variable overriding the connection pool size.
pub const POOL_SIZE_ENV: &str = "KANBAN_POOL_SIZE";

/// Database file used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "kanban.db";

/// SQLite URL for a private in-memory database.
pub const IN_MEMORY_DATABASE_URL: &str = ":memory:";

const DEFAULT_POOL_SIZE: u32 = 4;

/// Connection settings for the SQLite row store.
///
/// # Examples
///
/// ```
/// use kanban::storage::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert_eq!(config.database_url, "kanban.db");
///
/// let memory = StoreConfig::in_memory();
/// assert!(memory.is_in_memory());
/// assert_eq!(memory.pool_size, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database path or `:memory:`.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for the given database path.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Creates a configuration for a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` opens a distinct database, so the
    /// pool is pinned to a single connection.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: IN_MEMORY_DATABASE_URL.to_owned(),
            pool_size: 1,
        }
    }

    /// Reads the configuration from `KANBAN_DATABASE_URL` and
    /// `KANBAN_POOL_SIZE`, falling back to the defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidConfig`] when the pool size is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, StorageError> {
        let defaults = Self::default();
        let database_url = env::var(DATABASE_URL_ENV)
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.database_url);

        let pool_size = match env::var(POOL_SIZE_ENV) {
            Ok(raw) => parse_pool_size(&raw)?,
            Err(_) => defaults.pool_size,
        };

        Ok(Self {
            database_url,
            pool_size,
        })
    }

    /// Returns whether the configuration targets an in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_url == IN_MEMORY_DATABASE_URL
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, StorageError> {
    match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(StorageError::InvalidConfig(format!(
            "{POOL_SIZE_ENV} must be a positive integer, got '{raw}'"
        ))),
    }
}
