//! Write-through synchronizer between the live board graph and the row
//! store.

use crate::board::ports::{BoardStore, BoardWrite};
use std::sync::Arc;

/// Mirrors in-memory mutations into a [`BoardStore`].
///
/// Durability is best-effort: a failed write is logged and dropped, and the
/// in-memory mutation it mirrors stands. The two sides may diverge until the
/// next rebuild.
#[derive(Debug)]
pub struct WriteThrough<S>
where
    S: BoardStore,
{
    store: Arc<S>,
}

impl<S> WriteThrough<S>
where
    S: BoardStore,
{
    /// Creates a synchronizer over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies `writes` in order. Every write is attempted even when an
    /// earlier one fails.
    pub fn mirror(&self, writes: impl IntoIterator<Item = BoardWrite>) {
        for write in writes {
            if let Err(err) = self.store.apply(&write) {
                tracing::warn!(
                    write = write.label(),
                    board = %write.board(),
                    error = %err,
                    "row store write failed; in-memory state kept"
                );
            }
        }
    }
}
