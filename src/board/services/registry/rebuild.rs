//! Rebuilding the live board graph from the row store.

use super::{BoardRegistry, IdAllocator};
use crate::account::domain::EmailAddress;
use crate::account::ports::SessionGate;
use crate::board::{
    domain::{Board, BoardId, Task, TaskId},
    ports::{BoardSnapshot, BoardStore, BoardWrite},
    services::RegistryResult,
};
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};

/// Counts reported by [`BoardRegistry::load_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildSummary {
    /// Boards restored.
    pub boards: usize,
    /// Tasks restored.
    pub tasks: usize,
    /// Membership rows that could not be re-established and were skipped.
    /// The owner's own row is expected and not counted.
    pub skipped_members: usize,
    /// Task rows that were skipped because their board is gone or their
    /// column is over its limit.
    pub skipped_tasks: usize,
    /// Id the next created board will receive.
    pub next_board: BoardId,
    /// Id the next added task will receive.
    pub next_task: TaskId,
}

#[derive(Default)]
struct Rebuilt {
    boards: BTreeMap<BoardId, Board>,
    rejoined: Vec<(BoardId, EmailAddress)>,
    skipped_members: usize,
    skipped_tasks: usize,
    tasks: usize,
}

impl Rebuilt {
    fn restore_boards(&mut self, snapshot: &BoardSnapshot) {
        for data in &snapshot.boards {
            let board = Board::from_persisted(data.clone());
            self.boards.insert(board.id(), board);
        }
    }

    fn restore_members(&mut self, snapshot: &BoardSnapshot) {
        for row in &snapshot.members {
            let Some(board) = self.boards.get_mut(&row.board) else {
                tracing::warn!(
                    board = %row.board,
                    email = %row.email,
                    "membership row without a board skipped"
                );
                self.skipped_members += 1;
                continue;
            };
            if board.owner() == &row.email {
                continue;
            }
            if let Err(err) = board.join(&row.email) {
                tracing::debug!(board = %row.board, error = %err, "membership not re-established");
                self.skipped_members += 1;
            }
        }
    }

    fn restore_columns(&mut self, snapshot: &BoardSnapshot) {
        for row in &snapshot.columns {
            let Some(board) = self.boards.get_mut(&row.board) else {
                tracing::warn!(board = %row.board, "column row without a board skipped");
                continue;
            };
            // Columns are still empty here, so any limit fits.
            if let Err(err) = board.set_column_limit(row.ordinal, row.limit) {
                tracing::warn!(board = %row.board, error = %err, "column limit not restored");
            }
        }
    }

    fn restore_tasks(&mut self, snapshot: &BoardSnapshot) {
        for row in &snapshot.tasks {
            let Some(board) = self.boards.get_mut(&row.board) else {
                tracing::warn!(
                    board = %row.board,
                    task = %row.task.id,
                    "task row without a board skipped"
                );
                self.skipped_tasks += 1;
                continue;
            };
            let task = Task::from_persisted(row.task.clone());
            let assignee = task.assignee().cloned();
            if let Err(err) = board.restore_task(row.ordinal, task) {
                tracing::warn!(
                    board = %row.board,
                    task = %row.task.id,
                    error = %err,
                    "task row skipped"
                );
                self.skipped_tasks += 1;
                continue;
            }
            self.tasks += 1;

            if let Some(email) = assignee.filter(|email| !board.is_member(email)) {
                match board.join(&email) {
                    Ok(()) => self.rejoined.push((row.board, email)),
                    Err(err) => {
                        tracing::debug!(
                            board = %row.board,
                            error = %err,
                            "assignee membership not re-established"
                        );
                        self.skipped_members += 1;
                    }
                }
            }
        }
    }

    fn owner_index(&self) -> BTreeMap<EmailAddress, BTreeSet<BoardId>> {
        let mut index: BTreeMap<_, BTreeSet<BoardId>> = BTreeMap::new();
        for board in self.boards.values() {
            index.entry(board.owner().clone()).or_default().insert(board.id());
        }
        index
    }
}

fn resume_ids(snapshot: &BoardSnapshot) -> IdAllocator {
    let next_board = snapshot
        .boards
        .iter()
        .map(|data| data.id)
        .max()
        .map_or(IdAllocator::INITIAL_BOARD, BoardId::successor);
    let next_task = snapshot
        .tasks
        .iter()
        .map(|row| row.task.id)
        .max()
        .map_or(IdAllocator::INITIAL_TASK, TaskId::successor);
    IdAllocator::resume(next_board, next_task)
}

impl<S, G, C> BoardRegistry<S, G, C>
where
    S: BoardStore,
    G: SessionGate,
    C: Clock + Send + Sync,
{
    /// Replaces the live graph with the contents of the row store.
    ///
    /// Rows are applied in dependency order: boards (owner joined), stored
    /// memberships, column limits, then tasks (assignees joined when they
    /// are no longer members). Membership conflicts and orphaned or
    /// over-limit rows are logged and skipped. The only rows written back are
    /// the `BoardMembers` rows of re-joined assignees. Both id counters
    /// resume at one past the highest stored id.
    ///
    /// The snapshot is read before anything is cleared, so a failed read
    /// leaves the current graph in place.
    ///
    /// # Errors
    ///
    /// Returns [`crate::board::services::RegistryError::Store`] when the
    /// store cannot be read or holds undecodable rows.
    pub fn load_data(&mut self) -> RegistryResult<RebuildSummary> {
        let snapshot = self.sync.store().snapshot()?;

        let mut rebuilt = Rebuilt::default();
        rebuilt.restore_boards(&snapshot);
        rebuilt.restore_members(&snapshot);
        rebuilt.restore_columns(&snapshot);
        rebuilt.restore_tasks(&snapshot);

        self.owner_index = rebuilt.owner_index();
        self.ids = resume_ids(&snapshot);
        let summary = RebuildSummary {
            boards: rebuilt.boards.len(),
            tasks: rebuilt.tasks,
            skipped_members: rebuilt.skipped_members,
            skipped_tasks: rebuilt.skipped_tasks,
            next_board: self.ids.next_board,
            next_task: self.ids.next_task,
        };
        self.boards = rebuilt.boards;
        self.sync.mirror(
            rebuilt
                .rejoined
                .into_iter()
                .map(|(board, email)| BoardWrite::InsertMember { board, email }),
        );

        tracing::info!(
            boards = summary.boards,
            tasks = summary.tasks,
            skipped_members = summary.skipped_members,
            skipped_tasks = summary.skipped_tasks,
            "board registry rebuilt"
        );
        Ok(summary)
    }

    /// Deletes every member, task, column and board row, then empties the
    /// live graph and resets both id counters.
    ///
    /// # Errors
    ///
    /// Returns [`crate::board::services::RegistryError::Store`] when the
    /// rows cannot be deleted; the live graph is then left untouched.
    pub fn delete_data(&mut self) -> RegistryResult<()> {
        self.sync.store().clear()?;
        self.boards.clear();
        self.owner_index.clear();
        self.ids = IdAllocator::default();
        tracing::info!("board data deleted");
        Ok(())
    }
}
