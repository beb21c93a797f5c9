//! Contract tests run against both account repository adapters.

use crate::account::{
    adapters::{memory::InMemoryAccountRepository, sqlite::SqliteAccountRepository},
    domain::{EmailAddress, Password, UserAccount},
    ports::{AccountRepository, AccountRepositoryError},
};
use crate::storage::{StoreConfig, open_pool};
use rstest::rstest;

fn memory() -> Box<dyn AccountRepository> {
    Box::new(InMemoryAccountRepository::new())
}

fn sqlite() -> Box<dyn AccountRepository> {
    let pool = open_pool(&StoreConfig::in_memory()).expect("open in-memory pool");
    Box::new(SqliteAccountRepository::new(pool))
}

fn account(raw_email: &str) -> UserAccount {
    UserAccount::new(
        EmailAddress::new(raw_email).expect("valid email"),
        Password::new("Secret12").expect("valid password"),
    )
}

#[rstest]
#[case::memory(memory())]
#[case::sqlite(sqlite())]
fn accounts_are_listed_in_insertion_order(#[case] repository: Box<dyn AccountRepository>) {
    repository.store(&account("zed@example.com")).expect("store");
    repository.store(&account("amy@example.com")).expect("store");

    let listed: Vec<String> = repository
        .list_all()
        .expect("list")
        .iter()
        .map(|stored| stored.email().as_str().to_owned())
        .collect();

    assert_eq!(listed, ["zed@example.com", "amy@example.com"]);
}

#[rstest]
#[case::memory(memory())]
#[case::sqlite(sqlite())]
fn duplicate_email_is_rejected(#[case] repository: Box<dyn AccountRepository>) {
    repository.store(&account("ada@example.com")).expect("store");

    let result = repository.store(&account("ada@example.com"));

    assert!(matches!(
        result,
        Err(AccountRepositoryError::DuplicateAccount(_))
    ));
}

#[rstest]
#[case::memory(memory())]
#[case::sqlite(sqlite())]
fn clear_removes_every_account(#[case] repository: Box<dyn AccountRepository>) {
    repository.store(&account("ada@example.com")).expect("store");

    repository.clear().expect("clear");

    assert!(repository.list_all().expect("list").is_empty());
}

#[rstest]
fn stored_password_survives_sqlite_round_trip() {
    let repository = sqlite();
    repository.store(&account("ada@example.com")).expect("store");

    let listed = repository.list_all().expect("list");

    assert!(
        listed
            .first()
            .is_some_and(|stored| stored.password().matches("Secret12"))
    );
}
