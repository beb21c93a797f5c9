//! Error types for board domain validation and rules.

use super::{ColumnOrdinal, TaskField, TaskId};
use crate::account::domain::EmailAddress;
use crate::error::ErrorKind;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by task, column and board operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The title is empty or longer than the maximum.
    #[error("title must be 1-{max} characters, got {length}")]
    TitleLength {
        /// Length of the rejected title in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The title contains only whitespace.
    #[error("title must not be blank")]
    BlankTitle,

    /// The description is empty or longer than the maximum.
    #[error("description must be 1-{max} characters, got {length}")]
    DescriptionLength {
        /// Length of the rejected description in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The description contains only whitespace.
    #[error("description must not be blank")]
    BlankDescription,

    /// The due date lies before the current time.
    #[error("due date {due} is in the past")]
    DueDateInPast {
        /// The rejected due date.
        due: DateTime<Utc>,
    },

    /// The update names a field tasks do not have.
    #[error("field doesn't exist: {0}")]
    UnknownField(String),

    /// The update value has the wrong type for the field.
    #[error("wrong value type for field {0}")]
    WrongValueType(TaskField),

    /// The task is assigned to someone other than the requester.
    #[error("user {email} is not the assignee of task {task}")]
    NotAssignee {
        /// The task being changed.
        task: TaskId,
        /// The rejected requester.
        email: EmailAddress,
    },

    /// The board name is blank after trimming.
    #[error("board name must not be blank")]
    BlankBoardName,

    /// The raw column ordinal is not 0, 1 or 2.
    #[error("column doesn't exist: {0}")]
    UnknownColumn(i64),

    /// The raw WIP limit is neither positive nor the unbounded sentinel.
    #[error("invalid column limit {0}: expected a positive number or -1")]
    InvalidLimit(i64),

    /// The new WIP limit is below the number of tasks already held.
    #[error("column limit {limit} is below the {count} tasks it holds")]
    LimitBelowTaskCount {
        /// The rejected limit.
        limit: u32,
        /// Current task count.
        count: usize,
    },

    /// The column is at its WIP limit.
    #[error("column {0} is full")]
    ColumnFull(ColumnOrdinal),

    /// No column holds the task.
    #[error("task doesn't exist: {0}")]
    TaskNotFound(TaskId),

    /// Tasks in Done cannot be removed.
    #[error("cannot remove task {0} from the done column")]
    RemoveFromDone(TaskId),

    /// Tasks in Done cannot be edited or reassigned.
    #[error("cannot update task {0} in the done column")]
    UpdateInDone(TaskId),

    /// Tasks in Done cannot advance.
    #[error("task {0} is already in the done column")]
    AlreadyDone(TaskId),

    /// The user is not a member of the board.
    #[error("user is not a board member: {0}")]
    NotMember(EmailAddress),

    /// The prospective assignee is not a member of the board.
    #[error("assignee is not a board member: {0}")]
    AssigneeNotMember(EmailAddress),

    /// The user already belongs to the board.
    #[error("user is already a board member: {0}")]
    AlreadyMember(EmailAddress),
}

impl BoardDomainError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TitleLength { .. }
            | Self::BlankTitle
            | Self::DescriptionLength { .. }
            | Self::BlankDescription
            | Self::DueDateInPast { .. }
            | Self::UnknownField(_)
            | Self::WrongValueType(_)
            | Self::BlankBoardName
            | Self::UnknownColumn(_)
            | Self::InvalidLimit(_) => ErrorKind::Validation,
            Self::NotAssignee { .. } | Self::NotMember(_) | Self::AssigneeNotMember(_) => {
                ErrorKind::Authorization
            }
            Self::LimitBelowTaskCount { .. }
            | Self::ColumnFull(_)
            | Self::RemoveFromDone(_)
            | Self::UpdateInDone(_)
            | Self::AlreadyDone(_)
            | Self::AlreadyMember(_) => ErrorKind::State,
            Self::TaskNotFound(_) => ErrorKind::NotFound,
        }
    }
}
