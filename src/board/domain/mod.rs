//! Domain model for boards, columns and tasks.
//!
//! Everything here is pure in-memory state. Mutations report what changed
//! (for example [`TaskChange`] or [`TaskMove`]) so the registry can mirror
//! them into the row store; the domain never touches storage itself.

mod board;
mod column;
mod error;
mod ids;
mod limit;
mod name;
mod ordinal;
mod task;

pub use board::{Board, PersistedBoardData, TaskMove};
pub use column::Column;
pub use error::BoardDomainError;
pub use ids::{BoardId, TaskId};
pub use limit::WipLimit;
pub use name::BoardName;
pub use ordinal::ColumnOrdinal;
pub use task::{
    FieldValue, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, PersistedTaskData, Task, TaskChange,
    TaskDescription, TaskDraft, TaskField, TaskTitle,
};
