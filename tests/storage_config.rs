//! Tests for reading row-store settings from the environment.

mod test_helpers;

use kanban::SqliteKanban;
use kanban::storage::{
    DATABASE_URL_ENV, DEFAULT_DATABASE_URL, POOL_SIZE_ENV, StorageError, StoreConfig,
};
use rstest::rstest;
use test_helpers::ScopedEnv;

#[rstest]
fn unset_variables_fall_back_to_defaults() {
    let _env = ScopedEnv::apply(&[(DATABASE_URL_ENV, None), (POOL_SIZE_ENV, None)]);

    let config = StoreConfig::from_env().expect("defaults");
    assert_eq!(config, StoreConfig::default());
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
}

#[rstest]
fn variables_override_the_defaults() {
    let _env = ScopedEnv::apply(&[
        (DATABASE_URL_ENV, Some(" /tmp/boards.db ")),
        (POOL_SIZE_ENV, Some("8")),
    ]);

    let config = StoreConfig::from_env().expect("overrides");
    assert_eq!(config.database_url, "/tmp/boards.db");
    assert_eq!(config.pool_size, 8);
}

#[rstest]
fn blank_database_url_uses_the_default() {
    let _env = ScopedEnv::apply(&[(DATABASE_URL_ENV, Some("   ")), (POOL_SIZE_ENV, None)]);

    let config = StoreConfig::from_env().expect("blank url");
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
}

#[rstest]
#[case::zero("0")]
#[case::negative("-2")]
#[case::word("many")]
fn unusable_pool_size_is_rejected(#[case] raw: &str) {
    let _env = ScopedEnv::apply(&[(DATABASE_URL_ENV, None), (POOL_SIZE_ENV, Some(raw))]);

    let result = StoreConfig::from_env();
    assert!(
        matches!(&result, Err(StorageError::InvalidConfig(message)) if message.contains(raw)),
        "unexpected result: {result:?}"
    );
}

#[rstest]
fn from_env_opens_the_configured_database() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("env.db");
    let url = path.to_string_lossy().into_owned();
    let _env = ScopedEnv::apply(&[(DATABASE_URL_ENV, Some(&url)), (POOL_SIZE_ENV, Some("2"))]);

    let mut system = SqliteKanban::from_env()?;
    assert!(!system.register("ada@example.com", "Secret12").is_error());
    assert!(!system.load_data().is_error());
    assert!(path.exists());
    Ok(())
}
