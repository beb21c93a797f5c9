//! Port contracts for the account context.

pub mod repository;
pub mod session;

pub use repository::{AccountRepository, AccountRepositoryError, AccountRepositoryResult};
pub use session::{SessionError, SessionGate};
