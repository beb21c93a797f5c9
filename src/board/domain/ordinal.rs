//! The three fixed workflow stages.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a column in the Backlog → In Progress → Done workflow.
///
/// The numeric value is what the row store keeps in its `Ordinal` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrdinal {
    /// Tasks waiting to be started. New tasks always land here.
    Backlog,
    /// Tasks being worked on.
    InProgress,
    /// Terminal column: tasks here are immutable.
    Done,
}

impl ColumnOrdinal {
    /// Every ordinal in workflow order.
    pub const ALL: [Self; 3] = [Self::Backlog, Self::InProgress, Self::Done];

    /// Returns the stored ordinal as a signed integer.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Backlog => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Returns the next column in the workflow, or `None` for Done.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Backlog => Some(Self::InProgress),
            Self::InProgress => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Returns whether this is the terminal column.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns the display name used by callers.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ColumnOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<i64> for ColumnOrdinal {
    type Error = BoardDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Backlog),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Done),
            other => Err(BoardDomainError::UnknownColumn(other)),
        }
    }
}
