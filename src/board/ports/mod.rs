//! Port contracts for the board context.

pub mod store;

pub use store::{
    BoardSnapshot, BoardStore, BoardStoreError, BoardStoreResult, BoardWrite, ColumnRow,
    MemberRow, TaskRow,
};
