//! Task operations, addressed by board name among the caller's boards.

use super::BoardRegistry;
use crate::account::domain::EmailAddress;
use crate::account::ports::SessionGate;
use crate::board::{
    domain::{BoardName, ColumnOrdinal, FieldValue, Task, TaskDraft, TaskField, TaskId},
    ports::{BoardStore, BoardWrite},
    services::{RegistryError, RegistryResult},
};
use mockable::Clock;

impl<S, G, C> BoardRegistry<S, G, C>
where
    S: BoardStore,
    G: SessionGate,
    C: Clock + Send + Sync,
{
    /// Adds a task to the Backlog of a board the caller belongs to and
    /// returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::BoardNotFound`], or a [`RegistryError::Domain`] error
    /// for invalid fields or a full Backlog.
    pub fn add_task(
        &mut self,
        email: &str,
        board_name: &str,
        draft: TaskDraft,
    ) -> RegistryResult<TaskId> {
        let member = self.authorize(email)?;
        let name = BoardName::new(board_name)?;
        let board_id = self.member_board_id(&member, &name)?;

        let task = Task::new(self.ids.peek_task(), draft, &*self.clock)?;
        let task_id = task.id();
        self.boards
            .get_mut(&board_id)
            .ok_or(RegistryError::UnknownBoard(board_id))?
            .add_task(&member, task.clone())?;
        self.ids.commit_task();

        self.sync.mirror([BoardWrite::InsertTask {
            board: board_id,
            ordinal: ColumnOrdinal::Backlog,
            task,
        }]);
        Ok(task_id)
    }

    /// Removes a task that is not in Done.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::BoardNotFound`], or a [`RegistryError::Domain`] error
    /// when the task is missing or in Done.
    pub fn remove_task(
        &mut self,
        email: &str,
        board_name: &str,
        task_id: TaskId,
    ) -> RegistryResult<Task> {
        let member = self.authorize(email)?;
        let name = BoardName::new(board_name)?;
        let board_id = self.member_board_id(&member, &name)?;

        let (ordinal, task) = self
            .boards
            .get_mut(&board_id)
            .ok_or(RegistryError::UnknownBoard(board_id))?
            .remove_task(task_id)?;
        self.sync.mirror([BoardWrite::DeleteTask {
            board: board_id,
            ordinal,
            task: task_id,
        }]);
        Ok(task)
    }

    /// Moves a task to the next column and returns the column it entered.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::BoardNotFound`], or a [`RegistryError::Domain`] error
    /// when the task is missing, already in Done, blocked by the next
    /// column's limit, or assigned to someone else.
    pub fn advance_task(
        &mut self,
        email: &str,
        board_name: &str,
        task_id: TaskId,
    ) -> RegistryResult<ColumnOrdinal> {
        let member = self.authorize(email)?;
        let name = BoardName::new(board_name)?;
        let board_id = self.member_board_id(&member, &name)?;

        let moved = self
            .boards
            .get_mut(&board_id)
            .ok_or(RegistryError::UnknownBoard(board_id))?
            .advance_task(&member, task_id)?;
        let entered = moved.to;
        self.sync.mirror([BoardWrite::MoveTask {
            board: board_id,
            from: moved.from,
            task: moved.task,
            to: moved.to,
        }]);
        Ok(entered)
    }

    /// Updates one field of a task held in `ordinal`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::BoardNotFound`], or a [`RegistryError::Domain`] error
    /// when the column is Done, the task is missing or held by someone else,
    /// or the value is invalid.
    pub fn update_task(
        &mut self,
        email: &str,
        board_name: &str,
        ordinal: ColumnOrdinal,
        task_id: TaskId,
        field: TaskField,
        value: FieldValue,
    ) -> RegistryResult<()> {
        let member = self.authorize(email)?;
        let name = BoardName::new(board_name)?;
        let board_id = self.member_board_id(&member, &name)?;

        let change = self
            .boards
            .get_mut(&board_id)
            .ok_or(RegistryError::UnknownBoard(board_id))?
            .update_task(&member, task_id, ordinal, field, value, &*self.clock)?;
        self.sync.mirror([BoardWrite::UpdateTask {
            board: board_id,
            ordinal,
            task: task_id,
            change,
        }]);
        Ok(())
    }

    /// Assigns a task held in `ordinal` to another member of the board.
    ///
    /// The assignee does not need to be logged in.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotLoggedIn`],
    /// [`RegistryError::InvalidEmail`], [`RegistryError::BoardNotFound`], or
    /// a [`RegistryError::Domain`] error when either user is not a member,
    /// the column is Done, the task is missing, or the task is held by
    /// someone else.
    pub fn assign_task(
        &mut self,
        email: &str,
        board_name: &str,
        assignee: &str,
        ordinal: ColumnOrdinal,
        task_id: TaskId,
    ) -> RegistryResult<()> {
        let member = self.authorize(email)?;
        let new_assignee = EmailAddress::new(assignee)?;
        let name = BoardName::new(board_name)?;
        let board_id = self.member_board_id(&member, &name)?;

        let change = self
            .boards
            .get_mut(&board_id)
            .ok_or(RegistryError::UnknownBoard(board_id))?
            .assign_task(&member, &new_assignee, task_id, ordinal)?;
        self.sync.mirror([BoardWrite::UpdateTask {
            board: board_id,
            ordinal,
            task: task_id,
            change,
        }]);
        Ok(())
    }
}
