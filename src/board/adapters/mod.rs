//! Adapter implementations for the board row store.

pub mod memory;
pub mod sqlite;
