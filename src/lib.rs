//! Kanban: multi-user task boards with a write-through row store.
//!
//! Users register and log in; logged-in users create boards, invite members
//! by board id and move tasks through three fixed columns (Backlog, In
//! Progress, Done) under optional work-in-progress limits. Every accepted
//! change is applied to the in-memory graph first and then mirrored into a
//! row store, from which the whole graph can be rebuilt on startup.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory and `SQLite`)
//!
//! # Modules
//!
//! - [`account`]: Registration, login sessions and the `Users` table
//! - [`board`]: Tasks, columns, boards and the board registry
//! - [`storage`]: Shared `SQLite` connection pool and schema bootstrap
//! - [`envelope`]: Uniform `{ErrorMessage?, ReturnValue?}` responses
//! - [`system`]: The [`KanbanSystem`] facade wiring everything together

pub mod account;
pub mod board;
pub mod envelope;
pub mod error;
pub mod storage;
pub mod system;

pub use envelope::Response;
pub use error::ErrorKind;
pub use system::{InMemoryKanban, KanbanSystem, SqliteKanban, SystemError, SystemResult};
