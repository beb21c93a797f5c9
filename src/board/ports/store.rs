//! Write-through port for the board row store.
//!
//! The registry mirrors every successful in-memory mutation as one or more
//! [`BoardWrite`]s and reads the whole store back as a [`BoardSnapshot`] when
//! rebuilding.

use crate::account::domain::EmailAddress;
use crate::board::domain::{
    BoardId, BoardName, ColumnOrdinal, PersistedBoardData, PersistedTaskData, Task, TaskChange,
    TaskId, WipLimit,
};
use std::sync::Arc;
use thiserror::Error;

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// A single row-level change to the board tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardWrite {
    /// Insert a `Boards` row.
    InsertBoard {
        /// Board identifier.
        board: BoardId,
        /// Board name.
        name: BoardName,
        /// Board owner.
        owner: EmailAddress,
    },
    /// Delete a `Boards` row.
    DeleteBoard(BoardId),
    /// Update `Boards.OwnerEmail`.
    UpdateOwner {
        /// Board identifier.
        board: BoardId,
        /// New owner.
        owner: EmailAddress,
    },
    /// Insert a `Columns` row.
    InsertColumn {
        /// Board identifier.
        board: BoardId,
        /// Column ordinal.
        ordinal: ColumnOrdinal,
        /// Initial limit.
        limit: WipLimit,
    },
    /// Update `Columns.TasksLimit`.
    UpdateColumnLimit {
        /// Board identifier.
        board: BoardId,
        /// Column ordinal.
        ordinal: ColumnOrdinal,
        /// New limit.
        limit: WipLimit,
    },
    /// Delete every `Columns` row of a board.
    DeleteColumns(BoardId),
    /// Insert a `Tasks` row.
    InsertTask {
        /// Board identifier.
        board: BoardId,
        /// Column holding the task.
        ordinal: ColumnOrdinal,
        /// The task.
        task: Task,
    },
    /// Update one field of a `Tasks` row.
    UpdateTask {
        /// Board identifier.
        board: BoardId,
        /// Column holding the task.
        ordinal: ColumnOrdinal,
        /// Task identifier.
        task: TaskId,
        /// The changed field and its new value.
        change: TaskChange,
    },
    /// Move a `Tasks` row to another column.
    ///
    /// The row is deleted and re-inserted so that insertion order keeps
    /// matching column order after a rebuild.
    MoveTask {
        /// Board identifier.
        board: BoardId,
        /// Column the task left.
        from: ColumnOrdinal,
        /// The task as it now sits in `to`.
        task: Task,
        /// Column the task entered.
        to: ColumnOrdinal,
    },
    /// Delete a `Tasks` row.
    DeleteTask {
        /// Board identifier.
        board: BoardId,
        /// Column holding the task.
        ordinal: ColumnOrdinal,
        /// Task identifier.
        task: TaskId,
    },
    /// Delete every `Tasks` row of a board.
    DeleteBoardTasks(BoardId),
    /// Insert a `BoardMembers` row.
    InsertMember {
        /// Board identifier.
        board: BoardId,
        /// Member email.
        email: EmailAddress,
    },
    /// Delete a `BoardMembers` row.
    DeleteMember {
        /// Board identifier.
        board: BoardId,
        /// Member email.
        email: EmailAddress,
    },
    /// Delete every `BoardMembers` row of a board.
    DeleteBoardMembers(BoardId),
}

impl BoardWrite {
    /// Returns a short operation label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InsertBoard { .. } => "insert_board",
            Self::DeleteBoard(_) => "delete_board",
            Self::UpdateOwner { .. } => "update_owner",
            Self::InsertColumn { .. } => "insert_column",
            Self::UpdateColumnLimit { .. } => "update_column_limit",
            Self::DeleteColumns(_) => "delete_columns",
            Self::InsertTask { .. } => "insert_task",
            Self::UpdateTask { .. } => "update_task",
            Self::MoveTask { .. } => "move_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::DeleteBoardTasks(_) => "delete_board_tasks",
            Self::InsertMember { .. } => "insert_member",
            Self::DeleteMember { .. } => "delete_member",
            Self::DeleteBoardMembers(_) => "delete_board_members",
        }
    }

    /// Returns the board the write touches.
    #[must_use]
    pub const fn board(&self) -> BoardId {
        match self {
            Self::InsertBoard { board, .. }
            | Self::UpdateOwner { board, .. }
            | Self::InsertColumn { board, .. }
            | Self::UpdateColumnLimit { board, .. }
            | Self::InsertTask { board, .. }
            | Self::UpdateTask { board, .. }
            | Self::MoveTask { board, .. }
            | Self::DeleteTask { board, .. }
            | Self::InsertMember { board, .. }
            | Self::DeleteMember { board, .. } => *board,
            Self::DeleteBoard(board)
            | Self::DeleteColumns(board)
            | Self::DeleteBoardTasks(board)
            | Self::DeleteBoardMembers(board) => *board,
        }
    }
}

/// A `BoardMembers` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    /// Board identifier.
    pub board: BoardId,
    /// Member email.
    pub email: EmailAddress,
}

/// A `Columns` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRow {
    /// Board identifier.
    pub board: BoardId,
    /// Column ordinal.
    pub ordinal: ColumnOrdinal,
    /// Stored limit.
    pub limit: WipLimit,
}

/// A `Tasks` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Board identifier.
    pub board: BoardId,
    /// Column holding the task.
    pub ordinal: ColumnOrdinal,
    /// Stored task fields.
    pub task: PersistedTaskData,
}

/// Every board-side row, each table in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// `Boards` rows.
    pub boards: Vec<PersistedBoardData>,
    /// `BoardMembers` rows.
    pub members: Vec<MemberRow>,
    /// `Columns` rows.
    pub columns: Vec<ColumnRow>,
    /// `Tasks` rows.
    pub tasks: Vec<TaskRow>,
}

impl BoardSnapshot {
    /// Returns whether the store holds no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
            && self.members.is_empty()
            && self.columns.is_empty()
            && self.tasks.is_empty()
    }
}

/// Row store behind the board registry.
///
/// Implementations apply each write synchronously; the registry decides what
/// to do with a failure.
#[cfg_attr(test, mockall::automock)]
pub trait BoardStore: Send + Sync {
    /// Applies one row-level change.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::DuplicateRow`] for a primary-key clash,
    /// [`BoardStoreError::MissingRow`] when an update or single-row delete
    /// matches nothing, or [`BoardStoreError::Persistence`].
    fn apply(&self, write: &BoardWrite) -> BoardStoreResult<()>;

    /// Reads every board, member, column and task row.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::CorruptRow`] when a stored value cannot be
    /// decoded, or [`BoardStoreError::Persistence`].
    fn snapshot(&self) -> BoardStoreResult<BoardSnapshot>;

    /// Deletes every member, task, column and board row, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] when deletion fails.
    fn clear(&self) -> BoardStoreResult<()>;
}

/// Errors returned by board store implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// A row with the same primary key already exists.
    #[error("duplicate row: {0}")]
    DuplicateRow(String),

    /// The targeted row does not exist.
    #[error("missing row: {0}")]
    MissingRow(String),

    /// A stored row could not be decoded.
    #[error("corrupt row: {0}")]
    CorruptRow(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
