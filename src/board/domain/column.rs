//! Limit-bounded, insertion-ordered task holder.

use super::{BoardDomainError, ColumnOrdinal, Task, TaskId, WipLimit};
use crate::account::domain::EmailAddress;
use serde::{Serialize, Serializer};

/// One of the three workflow columns of a board.
///
/// `tasks().len()` never exceeds the limit after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    ordinal: ColumnOrdinal,
    #[serde(serialize_with = "serialize_limit")]
    limit: WipLimit,
    tasks: Vec<Task>,
}

fn serialize_limit<S: Serializer>(limit: &WipLimit, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(limit.to_raw())
}

impl Column {
    /// Creates an empty, unbounded column.
    #[must_use]
    pub const fn new(ordinal: ColumnOrdinal) -> Self {
        Self {
            ordinal,
            limit: WipLimit::Unbounded,
            tasks: Vec::new(),
        }
    }

    /// Returns the column ordinal.
    #[must_use]
    pub const fn ordinal(&self) -> ColumnOrdinal {
        self.ordinal
    }

    /// Returns the WIP limit.
    #[must_use]
    pub const fn limit(&self) -> WipLimit {
        self.limit
    }

    /// Returns the held tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the held task with `id`.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// Returns whether the column holds the task.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.task(id).is_some()
    }

    /// Returns whether one more task fits under the limit.
    #[must_use]
    pub fn can_accept(&self) -> bool {
        self.limit.admits_another(self.tasks.len())
    }

    /// Appends a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnFull`] when the column is at its
    /// limit.
    pub fn add(&mut self, task: Task) -> Result<(), BoardDomainError> {
        if !self.can_accept() {
            return Err(BoardDomainError::ColumnFull(self.ordinal));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Removes and returns the task, or `None` when it is not held here.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(position))
    }

    /// Returns whether `email` may act on the task: it is open or assigned to
    /// `email`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not held
    /// here.
    pub fn is_assignee_or_open(
        &self,
        email: &EmailAddress,
        id: TaskId,
    ) -> Result<bool, BoardDomainError> {
        self.task(id)
            .map(|task| task.is_open_to(email))
            .ok_or(BoardDomainError::TaskNotFound(id))
    }

    /// Replaces the WIP limit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::LimitBelowTaskCount`] when the column
    /// already holds more tasks than `limit` allows.
    pub fn set_limit(&mut self, limit: WipLimit) -> Result<(), BoardDomainError> {
        match limit {
            WipLimit::Max(max) if !limit.covers(self.tasks.len()) => {
                Err(BoardDomainError::LimitBelowTaskCount {
                    limit: max.get(),
                    count: self.tasks.len(),
                })
            }
            _ => {
                self.limit = limit;
                Ok(())
            }
        }
    }

    /// Clears the assignee of every task held by `email` and returns their
    /// ids.
    pub fn unassign_all(&mut self, email: &EmailAddress) -> Vec<TaskId> {
        let mut cleared = Vec::new();
        for task in &mut self.tasks {
            if task.is_assigned_to(email) && task.unassign() {
                cleared.push(task.id());
            }
        }
        cleared
    }

    /// Returns the tasks assigned to `email`.
    pub fn tasks_assigned_to<'a>(
        &'a self,
        email: &'a EmailAddress,
    ) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |task| task.is_assigned_to(email))
    }
}
