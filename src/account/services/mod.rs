//! Application services for the account context.

mod directory;

pub use directory::{AccountError, AccountResult, AccountService};
