//! SQLite adapter for the `Users` table.

mod models;
mod repository;
mod schema;

pub use repository::SqliteAccountRepository;
