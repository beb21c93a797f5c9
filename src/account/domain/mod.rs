//! Domain model for user accounts.
//!
//! Accounts only carry what the board context needs from its authentication
//! collaborator: a normalised email identity and a policy-checked password.

mod account;
mod email;
mod error;
mod password;

pub use account::UserAccount;
pub use email::EmailAddress;
pub use error::AccountDomainError;
pub use password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, Password};
