//! SQLite adapter for the `Boards`, `BoardMembers`, `Columns` and `Tasks`
//! tables.

mod models;
mod store;
mod schema;

pub use store::SqliteBoardStore;
