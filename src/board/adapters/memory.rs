//! In-memory board row store for tests and ephemeral systems.

use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{
        BoardId, ColumnOrdinal, PersistedBoardData, PersistedTaskData, Task, TaskChange, TaskId,
    },
    ports::{
        BoardSnapshot, BoardStore, BoardStoreError, BoardStoreResult, BoardWrite, ColumnRow,
        MemberRow, TaskRow,
    },
};

/// Thread-safe in-memory board store with primary-key semantics matching the
/// SQLite tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<BoardSnapshot>>,
}

impl InMemoryBoardStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> BoardStoreError {
    BoardStoreError::persistence(std::io::Error::other(err.to_string()))
}

fn task_row(task: &Task, board: BoardId, ordinal: ColumnOrdinal) -> TaskRow {
    TaskRow {
        board,
        ordinal,
        task: PersistedTaskData {
            id: task.id(),
            created_at: task.created_at(),
            due_date: task.due_date(),
            title: task.title().clone(),
            description: task.description().clone(),
            assignee: task.assignee().cloned(),
        },
    }
}

fn task_key_matches(row: &TaskRow, board: BoardId, ordinal: ColumnOrdinal, task: TaskId) -> bool {
    row.board == board && row.ordinal == ordinal && row.task.id == task
}

fn apply_change(data: &mut PersistedTaskData, change: &TaskChange) {
    match change {
        TaskChange::Title(title) => data.title = title.clone(),
        TaskChange::Description(description) => data.description = description.clone(),
        TaskChange::DueDate(due) => data.due_date = *due,
        TaskChange::Assignee(assignee) => data.assignee = assignee.clone(),
    }
}

fn ensure_task_absent(
    state: &BoardSnapshot,
    board: BoardId,
    ordinal: ColumnOrdinal,
    task: TaskId,
) -> BoardStoreResult<()> {
    if state
        .tasks
        .iter()
        .any(|stored| task_key_matches(stored, board, ordinal, task))
    {
        return Err(BoardStoreError::DuplicateRow(format!(
            "Tasks({board}, {}, {task})",
            ordinal.as_i64()
        )));
    }
    Ok(())
}

fn delete_task(
    state: &mut BoardSnapshot,
    board: BoardId,
    ordinal: ColumnOrdinal,
    task: TaskId,
) -> BoardStoreResult<()> {
    let position = state
        .tasks
        .iter()
        .position(|row| task_key_matches(row, board, ordinal, task))
        .ok_or_else(|| {
            BoardStoreError::MissingRow(format!("Tasks({board}, {}, {task})", ordinal.as_i64()))
        })?;
    state.tasks.remove(position);
    Ok(())
}

fn apply_board_write(state: &mut BoardSnapshot, write: &BoardWrite) -> BoardStoreResult<()> {
    match write {
        BoardWrite::InsertBoard { board, name, owner } => {
            if state.boards.iter().any(|row| row.id == *board) {
                return Err(BoardStoreError::DuplicateRow(format!("Boards({board})")));
            }
            state.boards.push(PersistedBoardData {
                id: *board,
                name: name.clone(),
                owner: owner.clone(),
            });
        }
        BoardWrite::DeleteBoard(board) => {
            let position = state
                .boards
                .iter()
                .position(|row| row.id == *board)
                .ok_or_else(|| BoardStoreError::MissingRow(format!("Boards({board})")))?;
            state.boards.remove(position);
        }
        BoardWrite::UpdateOwner { board, owner } => {
            let row = state
                .boards
                .iter_mut()
                .find(|row| row.id == *board)
                .ok_or_else(|| BoardStoreError::MissingRow(format!("Boards({board})")))?;
            row.owner = owner.clone();
        }
        BoardWrite::InsertColumn {
            board,
            ordinal,
            limit,
        } => {
            if state
                .columns
                .iter()
                .any(|row| row.board == *board && row.ordinal == *ordinal)
            {
                return Err(BoardStoreError::DuplicateRow(format!(
                    "Columns({board}, {})",
                    ordinal.as_i64()
                )));
            }
            state.columns.push(ColumnRow {
                board: *board,
                ordinal: *ordinal,
                limit: *limit,
            });
        }
        BoardWrite::UpdateColumnLimit {
            board,
            ordinal,
            limit,
        } => {
            let row = state
                .columns
                .iter_mut()
                .find(|row| row.board == *board && row.ordinal == *ordinal)
                .ok_or_else(|| {
                    BoardStoreError::MissingRow(format!("Columns({board}, {})", ordinal.as_i64()))
                })?;
            row.limit = *limit;
        }
        BoardWrite::DeleteColumns(board) => state.columns.retain(|row| row.board != *board),
        BoardWrite::InsertTask {
            board,
            ordinal,
            task,
        } => {
            ensure_task_absent(state, *board, *ordinal, task.id())?;
            state.tasks.push(task_row(task, *board, *ordinal));
        }
        BoardWrite::UpdateTask {
            board,
            ordinal,
            task,
            change,
        } => {
            let row = state
                .tasks
                .iter_mut()
                .find(|row| task_key_matches(row, *board, *ordinal, *task))
                .ok_or_else(|| {
                    BoardStoreError::MissingRow(format!(
                        "Tasks({board}, {}, {task})",
                        ordinal.as_i64()
                    ))
                })?;
            apply_change(&mut row.task, change);
        }
        BoardWrite::MoveTask {
            board,
            from,
            task,
            to,
        } => {
            ensure_task_absent(state, *board, *to, task.id())?;
            delete_task(state, *board, *from, task.id())?;
            state.tasks.push(task_row(task, *board, *to));
        }
        BoardWrite::DeleteTask {
            board,
            ordinal,
            task,
        } => delete_task(state, *board, *ordinal, *task)?,
        BoardWrite::DeleteBoardTasks(board) => state.tasks.retain(|row| row.board != *board),
        BoardWrite::InsertMember { board, email } => {
            if state
                .members
                .iter()
                .any(|row| row.board == *board && row.email == *email)
            {
                return Err(BoardStoreError::DuplicateRow(format!(
                    "BoardMembers({board}, {email})"
                )));
            }
            state.members.push(MemberRow {
                board: *board,
                email: email.clone(),
            });
        }
        BoardWrite::DeleteMember { board, email } => {
            let position = state
                .members
                .iter()
                .position(|row| row.board == *board && row.email == *email)
                .ok_or_else(|| {
                    BoardStoreError::MissingRow(format!("BoardMembers({board}, {email})"))
                })?;
            state.members.remove(position);
        }
        BoardWrite::DeleteBoardMembers(board) => state.members.retain(|row| row.board != *board),
    }
    Ok(())
}

impl BoardStore for InMemoryBoardStore {
    fn apply(&self, write: &BoardWrite) -> BoardStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        apply_board_write(&mut state, write)
    }

    fn snapshot(&self) -> BoardStoreResult<BoardSnapshot> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.clone())
    }

    fn clear(&self) -> BoardStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.members.clear();
        state.tasks.clear();
        state.columns.clear();
        state.boards.clear();
        Ok(())
    }
}
