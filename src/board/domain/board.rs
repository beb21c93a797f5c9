//! Board aggregate: three columns plus a membership set.

use super::{
    BoardDomainError, BoardId, BoardName, Column, ColumnOrdinal, FieldValue, Task, TaskChange,
    TaskField, TaskId, WipLimit,
};
use crate::account::domain::EmailAddress;
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeSet;

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted name.
    pub name: BoardName,
    /// Persisted owner.
    pub owner: EmailAddress,
}

/// Result of advancing a task to the next column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    /// The moved task, as it now sits in `to`.
    pub task: Task,
    /// Column the task left.
    pub from: ColumnOrdinal,
    /// Column the task entered.
    pub to: ColumnOrdinal,
}

/// A board with its Backlog, In Progress and Done columns.
///
/// The owner is always a member. Column identity never changes after
/// creation; only the held tasks and limits do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    id: BoardId,
    name: BoardName,
    owner: EmailAddress,
    members: BTreeSet<EmailAddress>,
    columns: [Column; 3],
}

impl Board {
    /// Creates an empty board with `owner` as its first member.
    #[must_use]
    pub fn new(id: BoardId, name: BoardName, owner: EmailAddress) -> Self {
        let members = BTreeSet::from([owner.clone()]);
        Self {
            id,
            name,
            owner,
            members,
            columns: ColumnOrdinal::ALL.map(Column::new),
        }
    }

    /// Reconstructs an empty board from persisted storage; members, limits
    /// and tasks are restored afterwards.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self::new(data.id, data.name, data.owner)
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board name.
    #[must_use]
    pub const fn name(&self) -> &BoardName {
        &self.name
    }

    /// Returns the current owner.
    #[must_use]
    pub const fn owner(&self) -> &EmailAddress {
        &self.owner
    }

    /// Returns the members in email order.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<EmailAddress> {
        &self.members
    }

    /// Returns whether `email` belongs to the board.
    #[must_use]
    pub fn is_member(&self, email: &EmailAddress) -> bool {
        self.members.contains(email)
    }

    /// Returns the column at `ordinal`.
    #[must_use]
    pub const fn column(&self, ordinal: ColumnOrdinal) -> &Column {
        match ordinal {
            ColumnOrdinal::Backlog => &self.columns[0],
            ColumnOrdinal::InProgress => &self.columns[1],
            ColumnOrdinal::Done => &self.columns[2],
        }
    }

    const fn column_mut(&mut self, ordinal: ColumnOrdinal) -> &mut Column {
        match ordinal {
            ColumnOrdinal::Backlog => &mut self.columns[0],
            ColumnOrdinal::InProgress => &mut self.columns[1],
            ColumnOrdinal::Done => &mut self.columns[2],
        }
    }

    /// Returns the three columns in workflow order.
    #[must_use]
    pub const fn columns(&self) -> &[Column; 3] {
        &self.columns
    }

    fn ensure_member(&self, email: &EmailAddress) -> Result<(), BoardDomainError> {
        if self.is_member(email) {
            Ok(())
        } else {
            Err(BoardDomainError::NotMember(email.clone()))
        }
    }

    /// Adds a task to Backlog on behalf of `email`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotMember`] or
    /// [`BoardDomainError::ColumnFull`].
    pub fn add_task(&mut self, email: &EmailAddress, task: Task) -> Result<(), BoardDomainError> {
        self.ensure_member(email)?;
        self.column_mut(ColumnOrdinal::Backlog).add(task)
    }

    /// Places a persisted task into `ordinal`, honouring the column limit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnFull`] when the limit is reached.
    pub fn restore_task(
        &mut self,
        ordinal: ColumnOrdinal,
        task: Task,
    ) -> Result<(), BoardDomainError> {
        self.column_mut(ordinal).add(task)
    }

    /// Finds the column holding the task, scanning Backlog to Done.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when no column holds it.
    pub fn find_column_of(&self, task_id: TaskId) -> Result<ColumnOrdinal, BoardDomainError> {
        ColumnOrdinal::ALL
            .into_iter()
            .find(|ordinal| self.column(*ordinal).contains(task_id))
            .ok_or(BoardDomainError::TaskNotFound(task_id))
    }

    /// Returns the task and the column holding it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when no column holds it.
    pub fn task(&self, task_id: TaskId) -> Result<(ColumnOrdinal, &Task), BoardDomainError> {
        let ordinal = self.find_column_of(task_id)?;
        self.column(ordinal)
            .task(task_id)
            .map(|task| (ordinal, task))
            .ok_or(BoardDomainError::TaskNotFound(task_id))
    }

    /// Removes a task that is not in Done.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] or
    /// [`BoardDomainError::RemoveFromDone`].
    pub fn remove_task(
        &mut self,
        task_id: TaskId,
    ) -> Result<(ColumnOrdinal, Task), BoardDomainError> {
        let ordinal = self.find_column_of(task_id)?;
        if ordinal.is_terminal() {
            return Err(BoardDomainError::RemoveFromDone(task_id));
        }
        self.column_mut(ordinal)
            .remove(task_id)
            .map(|task| (ordinal, task))
            .ok_or(BoardDomainError::TaskNotFound(task_id))
    }

    /// Moves a task one column forward on behalf of `email`.
    ///
    /// Checks run in order: terminal column, next column capacity, then
    /// assignee.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`],
    /// [`BoardDomainError::AlreadyDone`], [`BoardDomainError::ColumnFull`] or
    /// [`BoardDomainError::NotAssignee`].
    pub fn advance_task(
        &mut self,
        email: &EmailAddress,
        task_id: TaskId,
    ) -> Result<TaskMove, BoardDomainError> {
        let from = self.find_column_of(task_id)?;
        let Some(to) = from.next() else {
            return Err(BoardDomainError::AlreadyDone(task_id));
        };
        if !self.column(to).can_accept() {
            return Err(BoardDomainError::ColumnFull(to));
        }
        if !self.column(from).is_assignee_or_open(email, task_id)? {
            return Err(BoardDomainError::NotAssignee {
                task: task_id,
                email: email.clone(),
            });
        }

        let task = self
            .column_mut(from)
            .remove(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        self.column_mut(to).add(task.clone())?;
        Ok(TaskMove { task, from, to })
    }

    fn editable_task_mut(
        &mut self,
        task_id: TaskId,
        ordinal: ColumnOrdinal,
    ) -> Result<&mut Task, BoardDomainError> {
        if ordinal.is_terminal() {
            return Err(BoardDomainError::UpdateInDone(task_id));
        }
        self.column_mut(ordinal)
            .task_mut(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))
    }

    /// Updates one field of a task held in `ordinal`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotMember`],
    /// [`BoardDomainError::UpdateInDone`] for the Done column,
    /// [`BoardDomainError::TaskNotFound`]
    /// when the column does not hold the task, or the task's own error.
    pub fn update_task(
        &mut self,
        email: &EmailAddress,
        task_id: TaskId,
        ordinal: ColumnOrdinal,
        field: TaskField,
        value: FieldValue,
        clock: &impl Clock,
    ) -> Result<TaskChange, BoardDomainError> {
        self.ensure_member(email)?;
        self.editable_task_mut(task_id, ordinal)?
            .update(email, field, value, clock)
    }

    /// Assigns a task held in `ordinal` to `assignee` on behalf of `email`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotMember`],
    /// [`BoardDomainError::AssigneeNotMember`],
    /// [`BoardDomainError::UpdateInDone`], [`BoardDomainError::TaskNotFound`]
    /// or [`BoardDomainError::NotAssignee`].
    pub fn assign_task(
        &mut self,
        email: &EmailAddress,
        assignee: &EmailAddress,
        task_id: TaskId,
        ordinal: ColumnOrdinal,
    ) -> Result<TaskChange, BoardDomainError> {
        self.ensure_member(email)?;
        if !self.is_member(assignee) {
            return Err(BoardDomainError::AssigneeNotMember(assignee.clone()));
        }
        self.editable_task_mut(task_id, ordinal)?
            .assign(email, assignee)
    }

    /// Adds `email` to the members.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::AlreadyMember`].
    pub fn join(&mut self, email: &EmailAddress) -> Result<(), BoardDomainError> {
        if !self.members.insert(email.clone()) {
            return Err(BoardDomainError::AlreadyMember(email.clone()));
        }
        Ok(())
    }

    /// Removes `email` from the members and unassigns their Backlog and In
    /// Progress tasks. Done tasks keep their assignee.
    ///
    /// Returns the unassigned tasks with their columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotMember`].
    pub fn leave(
        &mut self,
        email: &EmailAddress,
    ) -> Result<Vec<(ColumnOrdinal, TaskId)>, BoardDomainError> {
        if !self.members.remove(email) {
            return Err(BoardDomainError::NotMember(email.clone()));
        }
        let mut unassigned = Vec::new();
        for ordinal in [ColumnOrdinal::Backlog, ColumnOrdinal::InProgress] {
            unassigned.extend(
                self.column_mut(ordinal)
                    .unassign_all(email)
                    .into_iter()
                    .map(|task_id| (ordinal, task_id)),
            );
        }
        Ok(unassigned)
    }

    /// Replaces the WIP limit of a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::LimitBelowTaskCount`].
    pub fn set_column_limit(
        &mut self,
        ordinal: ColumnOrdinal,
        limit: WipLimit,
    ) -> Result<(), BoardDomainError> {
        self.column_mut(ordinal).set_limit(limit)
    }

    /// Hands ownership to an existing member.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotMember`] when `new_owner` has not
    /// joined.
    pub fn transfer_to(&mut self, new_owner: &EmailAddress) -> Result<(), BoardDomainError> {
        self.ensure_member(new_owner)?;
        self.owner = new_owner.clone();
        Ok(())
    }

    /// Returns the In Progress tasks assigned to `email`.
    pub fn in_progress_tasks_of<'a>(
        &'a self,
        email: &'a EmailAddress,
    ) -> impl Iterator<Item = &'a Task> + 'a {
        self.column(ColumnOrdinal::InProgress)
            .tasks_assigned_to(email)
    }
}
