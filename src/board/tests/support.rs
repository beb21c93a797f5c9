//! Shared fixtures for board tests.

use std::sync::Arc;

use crate::account::{
    adapters::memory::InMemoryAccountRepository, domain::EmailAddress, services::AccountService,
};
use crate::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{Task, TaskDraft, TaskId},
    services::BoardRegistry,
};
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;

pub const OWNER: &str = "owner@example.com";
pub const MEMBER: &str = "member@example.com";
pub const OUTSIDER: &str = "outsider@example.com";
pub const PASSWORD: &str = "Secret12";

pub type TestAccounts = AccountService<InMemoryAccountRepository>;
pub type TestRegistry = BoardRegistry<InMemoryBoardStore, TestAccounts, DefaultClock>;

pub fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

pub fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(title, format!("{title} description"), in_days(5))
}

pub fn task(id: u64, title: &str) -> Task {
    Task::new(TaskId::new(id), draft(title), &DefaultClock).expect("valid task")
}

/// A registry over an in-memory store with registered, logged-in users.
pub struct Harness {
    pub store: Arc<InMemoryBoardStore>,
    pub accounts: Arc<TestAccounts>,
    pub registry: TestRegistry,
}

impl Harness {
    pub fn new() -> Self {
        Self::over(Arc::new(InMemoryBoardStore::new()))
    }

    pub fn over(store: Arc<InMemoryBoardStore>) -> Self {
        let accounts = Arc::new(AccountService::new(Arc::new(InMemoryAccountRepository::new())));
        for user in [OWNER, MEMBER, OUTSIDER] {
            accounts.register(user, PASSWORD).expect("registration");
        }
        let registry = BoardRegistry::new(
            Arc::clone(&store),
            Arc::clone(&accounts),
            Arc::new(DefaultClock),
        );
        Self {
            store,
            accounts,
            registry,
        }
    }
}
