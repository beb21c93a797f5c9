//! Whole-system facade over the account and board contexts.
//!
//! [`KanbanSystem`] wires an [`AccountService`] and a [`BoardRegistry`] over
//! one row store and answers every operation with a [`Response`] envelope.
//! Arguments arrive as plain strings and integers; identifiers and column
//! ordinals are validated here before the services see them.

use crate::account::{
    adapters::{memory::InMemoryAccountRepository, sqlite::SqliteAccountRepository},
    domain::EmailAddress,
    ports::AccountRepository,
    services::{AccountError, AccountService},
};
use crate::board::{
    adapters::{memory::InMemoryBoardStore, sqlite::SqliteBoardStore},
    domain::{BoardId, Column, ColumnOrdinal, FieldValue, Task, TaskDraft, TaskField, TaskId},
    ports::BoardStore,
    services::{BoardRegistry, RebuildSummary, RegistryError, RegistryResult},
};
use crate::envelope::Response;
use crate::error::ErrorKind;
use crate::storage::{StorageError, StoreConfig, open_pool};
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by whole-system operations.
#[derive(Debug, Error)]
pub enum SystemError {
    /// The account directory rejected the operation.
    #[error(transparent)]
    Accounts(#[from] AccountError),

    /// The board registry rejected the operation.
    #[error(transparent)]
    Boards(#[from] RegistryError),

    /// The row store could not be configured or opened.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SystemError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Accounts(err) => err.kind(),
            Self::Boards(err) => err.kind(),
            Self::Storage(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for whole-system operations.
pub type SystemResult<T> = Result<T, SystemError>;

/// A system backed by the in-memory adapters.
pub type InMemoryKanban = KanbanSystem<InMemoryAccountRepository, InMemoryBoardStore>;

/// A system backed by the SQLite adapters.
pub type SqliteKanban = KanbanSystem<SqliteAccountRepository, SqliteBoardStore>;

/// Entry point for callers that speak in strings and integers.
///
/// Mutating operations take `&mut self`; share the system across threads
/// behind a lock.
///
/// # Examples
///
/// ```
/// use kanban::InMemoryKanban;
///
/// let mut system = InMemoryKanban::in_memory();
/// assert!(!system.register("ada@example.com", "Secret12").is_error());
///
/// let created = system.create_board("ada@example.com", "Launch");
/// assert_eq!(created.return_value.map(|id| id.value()), Some(1));
///
/// let duplicate = system.create_board("ada@example.com", "Launch");
/// assert!(duplicate.is_error());
/// ```
pub struct KanbanSystem<R, S, C = DefaultClock>
where
    R: AccountRepository,
    S: BoardStore,
    C: Clock + Send + Sync,
{
    accounts: Arc<AccountService<R>>,
    boards: BoardRegistry<S, AccountService<R>, C>,
}

impl InMemoryKanban {
    /// Creates an empty system over the in-memory adapters.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryBoardStore::new()),
            Arc::new(DefaultClock),
        )
    }
}

impl SqliteKanban {
    /// Opens the SQLite row store described by `config`.
    ///
    /// Both adapters share one connection pool. Nothing is loaded; call
    /// [`KanbanSystem::load_data`] to rebuild from stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the pool or schema cannot be set up.
    pub fn open(config: &StoreConfig) -> Result<Self, StorageError> {
        let pool = open_pool(config)?;
        tracing::info!(
            database_url = %config.database_url,
            pool_size = config.pool_size,
            "row store opened"
        );
        Ok(Self::new(
            Arc::new(SqliteAccountRepository::new(pool.clone())),
            Arc::new(SqliteBoardStore::new(pool)),
            Arc::new(DefaultClock),
        ))
    }

    /// Opens the row store configured through the environment.
    ///
    /// # Errors
    ///
    /// See [`StoreConfig::from_env`] and [`SqliteKanban::open`].
    pub fn from_env() -> Result<Self, StorageError> {
        Self::open(&StoreConfig::from_env()?)
    }
}

impl<R, S, C> KanbanSystem<R, S, C>
where
    R: AccountRepository,
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Wires a system over explicit adapters and clock.
    #[must_use]
    pub fn new(repository: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        let accounts = Arc::new(AccountService::new(repository));
        let boards = BoardRegistry::new(store, Arc::clone(&accounts), clock);
        Self { accounts, boards }
    }

    /// Returns the account directory.
    #[must_use]
    pub fn accounts(&self) -> &AccountService<R> {
        &self.accounts
    }

    /// Returns the board registry.
    #[must_use]
    pub const fn registry(&self) -> &BoardRegistry<S, AccountService<R>, C> {
        &self.boards
    }

    /// Registers a user and logs them in.
    pub fn register(&self, email: &str, password: &str) -> Response<()> {
        acknowledge("register", self.accounts.register(email, password))
    }

    /// Logs a user in and returns the normalised email.
    pub fn login(&self, email: &str, password: &str) -> Response<EmailAddress> {
        respond("login", self.accounts.login(email, password))
    }

    /// Logs a user out.
    pub fn logout(&self, email: &str) -> Response<()> {
        acknowledge("logout", self.accounts.logout(email))
    }

    /// Creates a board and returns its id.
    pub fn create_board(&mut self, email: &str, board_name: &str) -> Response<BoardId> {
        respond("create_board", self.boards.create_board(email, board_name))
    }

    /// Deletes a board the caller owns.
    pub fn delete_board(&mut self, email: &str, board_name: &str) -> Response<()> {
        acknowledge("delete_board", self.boards.delete_board(email, board_name))
    }

    /// Sets the WIP limit of a column; `-1` removes the limit.
    pub fn limit_column(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        limit: i64,
    ) -> Response<()> {
        let result = ColumnOrdinal::try_from(column)
            .map_err(RegistryError::from)
            .and_then(|ordinal| self.boards.limit_column(email, board_name, ordinal, limit));
        acknowledge("limit_column", result)
    }

    /// Hands a board to one of its members.
    pub fn transfer_ownership(
        &mut self,
        current_owner: &str,
        new_owner: &str,
        board_name: &str,
    ) -> Response<()> {
        acknowledge(
            "transfer_ownership",
            self.boards
                .transfer_ownership(current_owner, new_owner, board_name),
        )
    }

    /// Joins a board by id.
    pub fn join_board(&mut self, email: &str, board_id: u64) -> Response<()> {
        acknowledge(
            "join_board",
            self.boards.join_board(email, BoardId::new(board_id)),
        )
    }

    /// Leaves a board by id.
    pub fn leave_board(&mut self, email: &str, board_id: u64) -> Response<()> {
        acknowledge(
            "leave_board",
            self.boards.leave_board(email, BoardId::new(board_id)),
        )
    }

    /// Returns the three columns of a board.
    pub fn columns(&self, email: &str, board_name: &str) -> Response<Vec<Column>> {
        respond(
            "columns",
            self.boards
                .columns(email, board_name)
                .map(|columns| columns.to_vec()),
        )
    }

    /// Returns the ids of the caller's boards.
    pub fn user_boards(&self, email: &str) -> Response<Vec<BoardId>> {
        respond("user_boards", self.boards.user_boards(email))
    }

    /// Returns a column's WIP limit as stored: a positive count or `-1`.
    pub fn column_limit(&self, email: &str, board_name: &str, column: i64) -> Response<i64> {
        let result = ColumnOrdinal::try_from(column)
            .map_err(RegistryError::from)
            .and_then(|ordinal| self.boards.column_limit(email, board_name, ordinal))
            .map(|limit| limit.to_raw());
        respond("column_limit", result)
    }

    /// Returns a column's display name.
    pub fn column_name(
        &self,
        email: &str,
        board_name: &str,
        column: i64,
    ) -> Response<String> {
        let result = ColumnOrdinal::try_from(column)
            .map_err(RegistryError::from)
            .and_then(|ordinal| self.boards.column_name(email, board_name, ordinal))
            .map(str::to_owned);
        respond("column_name", result)
    }

    /// Returns the tasks of one column.
    pub fn column(&self, email: &str, board_name: &str, column: i64) -> Response<Vec<Task>> {
        let result = ColumnOrdinal::try_from(column)
            .map_err(RegistryError::from)
            .and_then(|ordinal| self.boards.column(email, board_name, ordinal))
            .map(|found| found.tasks().to_vec());
        respond("column", result)
    }

    /// Returns a board's name.
    pub fn board_name(&self, board_id: u64) -> Response<String> {
        let result = self
            .boards
            .board_name(BoardId::new(board_id))
            .map(|name| name.as_str().to_owned());
        respond("board_name", result)
    }

    /// Returns a board's owner.
    pub fn board_owner(&self, board_id: u64) -> Response<EmailAddress> {
        let result = self.boards.board_owner(BoardId::new(board_id)).cloned();
        respond("board_owner", result)
    }

    /// Returns the boards of every other owner, keyed by owner.
    pub fn all_boards(&self, email: &str) -> Response<BTreeMap<EmailAddress, Vec<BoardId>>> {
        respond("all_boards", self.boards.all_boards(email))
    }

    /// Returns the members of a board.
    pub fn board_members(&self, email: &str, board_name: &str) -> Response<Vec<EmailAddress>> {
        respond("board_members", self.boards.board_members(email, board_name))
    }

    /// Adds a task to a board's Backlog and returns its id.
    pub fn add_task(
        &mut self,
        email: &str,
        board_name: &str,
        title: &str,
        description: &str,
        due_date: DateTime<Utc>,
    ) -> Response<TaskId> {
        let draft = TaskDraft::new(title, description, due_date);
        respond("add_task", self.boards.add_task(email, board_name, draft))
    }

    /// Removes a task that is not in Done and returns it.
    pub fn remove_task(&mut self, email: &str, board_name: &str, task_id: u64) -> Response<Task> {
        respond(
            "remove_task",
            self.boards
                .remove_task(email, board_name, TaskId::new(task_id)),
        )
    }

    /// Moves a task to the next column and returns the column it entered.
    pub fn advance_task(
        &mut self,
        email: &str,
        board_name: &str,
        task_id: u64,
    ) -> Response<ColumnOrdinal> {
        respond(
            "advance_task",
            self.boards
                .advance_task(email, board_name, TaskId::new(task_id)),
        )
    }

    /// Updates the field named `field` (`title`, `description` or
    /// `due_date`) of a task.
    pub fn update_task(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: u64,
        field: &str,
        value: FieldValue,
    ) -> Response<()> {
        let result = self.update_field(email, board_name, column, task_id, field, value);
        acknowledge("update_task", result)
    }

    fn update_field(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: u64,
        field: &str,
        value: FieldValue,
    ) -> RegistryResult<()> {
        let ordinal = ColumnOrdinal::try_from(column)?;
        let task_field = TaskField::try_from(field)?;
        self.boards.update_task(
            email,
            board_name,
            ordinal,
            TaskId::new(task_id),
            task_field,
            value,
        )
    }

    /// Replaces a task's title.
    pub fn update_task_title(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: u64,
        title: &str,
    ) -> Response<()> {
        self.update_task(
            email,
            board_name,
            column,
            task_id,
            "title",
            FieldValue::Text(title.to_owned()),
        )
    }

    /// Replaces a task's description.
    pub fn update_task_description(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: u64,
        description: &str,
    ) -> Response<()> {
        self.update_task(
            email,
            board_name,
            column,
            task_id,
            "description",
            FieldValue::Text(description.to_owned()),
        )
    }

    /// Replaces a task's due date.
    pub fn update_task_due_date(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: u64,
        due_date: DateTime<Utc>,
    ) -> Response<()> {
        self.update_task(
            email,
            board_name,
            column,
            task_id,
            "due_date",
            FieldValue::Date(due_date),
        )
    }

    /// Assigns a task to a board member.
    pub fn assign_task(
        &mut self,
        email: &str,
        board_name: &str,
        assignee: &str,
        column: i64,
        task_id: u64,
    ) -> Response<()> {
        let result = ColumnOrdinal::try_from(column)
            .map_err(RegistryError::from)
            .and_then(|ordinal| {
                self.boards
                    .assign_task(email, board_name, assignee, ordinal, TaskId::new(task_id))
            });
        acknowledge("assign_task", result)
    }

    /// Returns the caller's In Progress tasks across their boards.
    pub fn in_progress_tasks(&self, email: &str) -> Response<Vec<Task>> {
        respond("in_progress_tasks", self.boards.in_progress_tasks(email))
    }

    /// Rebuilds users, then boards, from the row store.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError`] when either context cannot be read.
    pub fn reload(&mut self) -> SystemResult<RebuildSummary> {
        let users = self.accounts.load_data()?;
        let summary = self.boards.load_data()?;
        tracing::info!(users, boards = summary.boards, "system data loaded");
        Ok(summary)
    }

    /// Deletes every stored board row, then every stored user.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError`] when either context cannot be cleared.
    pub fn purge(&mut self) -> SystemResult<()> {
        self.boards.delete_data()?;
        self.accounts.delete_data()?;
        Ok(())
    }

    /// Envelope form of [`KanbanSystem::reload`].
    pub fn load_data(&mut self) -> Response<()> {
        let result = self.reload();
        acknowledge("load_data", result)
    }

    /// Envelope form of [`KanbanSystem::purge`].
    pub fn delete_data(&mut self) -> Response<()> {
        let result = self.purge();
        acknowledge("delete_data", result)
    }
}

fn respond<T, E>(operation: &'static str, result: Result<T, E>) -> Response<T>
where
    E: Into<SystemError>,
{
    result.map_or_else(|err| reject(operation, &err.into()), Response::ok)
}

fn reject<T>(operation: &'static str, error: &SystemError) -> Response<T> {
    let kind = error.kind();
    tracing::warn!(operation, %kind, %error, "operation rejected");
    Response::error(kind, error.to_string())
}

fn acknowledge<T, E>(operation: &'static str, result: Result<T, E>) -> Response<()>
where
    E: Into<SystemError>,
{
    let response = respond(operation, result);
    Response {
        error_message: response.error_message,
        error_kind: response.error_kind,
        return_value: None,
    }
}
