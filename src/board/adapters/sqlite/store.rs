//! SQLite row store implementation for boards.

use super::{
    models::{
        BoardRecord, ColumnRecord, MemberRecord, NewBoardRecord, NewColumnRecord,
        NewMemberRecord, NewTaskRecord, TaskRecord,
    },
    schema::{board_members, boards, columns, tasks},
};
use crate::account::domain::EmailAddress;
use crate::board::{
    domain::{
        BoardId, BoardName, ColumnOrdinal, PersistedBoardData, PersistedTaskData, Task,
        TaskChange, TaskDescription, TaskId, TaskTitle, WipLimit,
    },
    ports::{
        BoardSnapshot, BoardStore, BoardStoreError, BoardStoreResult, BoardWrite, ColumnRow,
        MemberRow, TaskRow,
    },
};
use crate::storage::SqlitePool;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use std::fmt;

/// SQLite-backed board store.
///
/// Every write runs in its own transaction. Timestamps are stored as RFC 3339
/// UTC text with nanosecond precision; an open task stores an empty
/// `AssigneeEmail`.
#[derive(Debug, Clone)]
pub struct SqliteBoardStore {
    pool: SqlitePool,
}

impl SqliteBoardStore {
    /// Creates a store over an open connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> BoardStoreResult<T>,
    ) -> BoardStoreResult<T> {
        let mut connection = self.pool.get().map_err(BoardStoreError::persistence)?;
        f(&mut connection)
    }
}

impl From<DieselError> for BoardStoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::DuplicateRow(info.message().to_owned())
            }
            other => Self::persistence(other),
        }
    }
}

impl BoardStore for SqliteBoardStore {
    fn apply(&self, write: &BoardWrite) -> BoardStoreResult<()> {
        self.with_connection(|connection| {
            connection.transaction::<_, BoardStoreError, _>(|conn| apply_write(conn, write))
        })
    }

    fn snapshot(&self) -> BoardStoreResult<BoardSnapshot> {
        let (board_rows, member_rows, column_rows, task_rows) =
            self.with_connection(|connection| {
                connection.transaction::<_, BoardStoreError, _>(|conn| {
                    let board_rows = diesel::sql_query(
                        "SELECT Id AS id, Name AS name, OwnerEmail AS owner_email \
                         FROM Boards ORDER BY rowid",
                    )
                    .load::<BoardRecord>(conn)?;
                    let member_rows = diesel::sql_query(
                        "SELECT BoardID AS board_id, Email AS email \
                         FROM BoardMembers ORDER BY rowid",
                    )
                    .load::<MemberRecord>(conn)?;
                    let column_rows = diesel::sql_query(
                        "SELECT BoardID AS board_id, Ordinal AS ordinal, TasksLimit AS tasks_limit \
                         FROM Columns ORDER BY rowid",
                    )
                    .load::<ColumnRecord>(conn)?;
                    let task_rows = diesel::sql_query(
                        "SELECT BoardID AS board_id, Ordinal AS ordinal, TaskId AS task_id, \
                         AssigneeEmail AS assignee_email, Title AS title, \
                         Description AS description, DueDate AS due_date, \
                         CreationTime AS creation_time \
                         FROM Tasks ORDER BY rowid",
                    )
                    .load::<TaskRecord>(conn)?;
                    Ok((board_rows, member_rows, column_rows, task_rows))
                })
            })?;

        Ok(BoardSnapshot {
            boards: board_rows
                .into_iter()
                .map(decode_board)
                .collect::<BoardStoreResult<_>>()?,
            members: member_rows
                .into_iter()
                .map(decode_member)
                .collect::<BoardStoreResult<_>>()?,
            columns: column_rows
                .into_iter()
                .map(decode_column)
                .collect::<BoardStoreResult<_>>()?,
            tasks: task_rows
                .into_iter()
                .map(decode_task)
                .collect::<BoardStoreResult<_>>()?,
        })
    }

    fn clear(&self) -> BoardStoreResult<()> {
        self.with_connection(|connection| {
            connection.transaction::<_, BoardStoreError, _>(|conn| {
                diesel::delete(board_members::table).execute(conn)?;
                diesel::delete(tasks::table).execute(conn)?;
                diesel::delete(columns::table).execute(conn)?;
                diesel::delete(boards::table).execute(conn)?;
                Ok(())
            })
        })
    }
}

fn apply_write(conn: &mut SqliteConnection, write: &BoardWrite) -> BoardStoreResult<()> {
    match write {
        BoardWrite::InsertBoard { board, name, owner } => {
            diesel::insert_into(boards::table)
                .values(&NewBoardRecord {
                    id: sql_id(board.value())?,
                    name: name.as_str(),
                    owner_email: owner.as_str(),
                })
                .execute(conn)?;
            Ok(())
        }
        BoardWrite::DeleteBoard(board) => {
            let deleted = diesel::delete(boards::table.filter(boards::id.eq(sql_id(board.value())?)))
                .execute(conn)?;
            expect_rows(deleted, || format!("Boards({board})"))
        }
        BoardWrite::UpdateOwner { board, owner } => {
            let updated =
                diesel::update(boards::table.filter(boards::id.eq(sql_id(board.value())?)))
                    .set(boards::owner_email.eq(owner.as_str()))
                    .execute(conn)?;
            expect_rows(updated, || format!("Boards({board})"))
        }
        BoardWrite::InsertColumn {
            board,
            ordinal,
            limit,
        } => {
            diesel::insert_into(columns::table)
                .values(&NewColumnRecord {
                    board_id: sql_id(board.value())?,
                    ordinal: ordinal.as_i64(),
                    tasks_limit: limit.to_raw(),
                })
                .execute(conn)?;
            Ok(())
        }
        BoardWrite::UpdateColumnLimit {
            board,
            ordinal,
            limit,
        } => {
            let updated = diesel::update(
                columns::table
                    .filter(columns::board_id.eq(sql_id(board.value())?))
                    .filter(columns::ordinal.eq(ordinal.as_i64())),
            )
            .set(columns::tasks_limit.eq(limit.to_raw()))
            .execute(conn)?;
            expect_rows(updated, || format!("Columns({board}, {})", ordinal.as_i64()))
        }
        BoardWrite::DeleteColumns(board) => {
            diesel::delete(columns::table.filter(columns::board_id.eq(sql_id(board.value())?)))
                .execute(conn)?;
            Ok(())
        }
        BoardWrite::InsertTask {
            board,
            ordinal,
            task,
        } => insert_task(conn, *board, *ordinal, task),
        BoardWrite::UpdateTask {
            board,
            ordinal,
            task,
            change,
        } => update_task(conn, *board, *ordinal, *task, change),
        BoardWrite::MoveTask {
            board,
            from,
            task,
            to,
        } => {
            delete_task(conn, *board, *from, task.id())?;
            insert_task(conn, *board, *to, task)
        }
        BoardWrite::DeleteTask {
            board,
            ordinal,
            task,
        } => delete_task(conn, *board, *ordinal, *task),
        BoardWrite::DeleteBoardTasks(board) => {
            diesel::delete(tasks::table.filter(tasks::board_id.eq(sql_id(board.value())?)))
                .execute(conn)?;
            Ok(())
        }
        BoardWrite::InsertMember { board, email } => {
            diesel::insert_into(board_members::table)
                .values(&NewMemberRecord {
                    board_id: sql_id(board.value())?,
                    email: email.as_str(),
                })
                .execute(conn)?;
            Ok(())
        }
        BoardWrite::DeleteMember { board, email } => {
            let deleted = diesel::delete(
                board_members::table
                    .filter(board_members::board_id.eq(sql_id(board.value())?))
                    .filter(board_members::email.eq(email.as_str())),
            )
            .execute(conn)?;
            expect_rows(deleted, || format!("BoardMembers({board}, {email})"))
        }
        BoardWrite::DeleteBoardMembers(board) => {
            diesel::delete(
                board_members::table.filter(board_members::board_id.eq(sql_id(board.value())?)),
            )
            .execute(conn)?;
            Ok(())
        }
    }
}

fn insert_task(
    conn: &mut SqliteConnection,
    board: BoardId,
    ordinal: ColumnOrdinal,
    task: &Task,
) -> BoardStoreResult<()> {
    let record = NewTaskRecord {
        board_id: sql_id(board.value())?,
        ordinal: ordinal.as_i64(),
        task_id: sql_id(task.id().value())?,
        assignee_email: encode_assignee(task.assignee()).to_owned(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        due_date: format_timestamp(task.due_date()),
        creation_time: format_timestamp(task.created_at()),
    };
    diesel::insert_into(tasks::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}

fn update_task(
    conn: &mut SqliteConnection,
    board: BoardId,
    ordinal: ColumnOrdinal,
    task: TaskId,
    change: &TaskChange,
) -> BoardStoreResult<()> {
    let target = tasks::table
        .filter(tasks::board_id.eq(sql_id(board.value())?))
        .filter(tasks::ordinal.eq(ordinal.as_i64()))
        .filter(tasks::task_id.eq(sql_id(task.value())?));
    let update = diesel::update(target);
    let updated = match change {
        TaskChange::Title(title) => update.set(tasks::title.eq(title.as_str())).execute(conn)?,
        TaskChange::Description(description) => update
            .set(tasks::description.eq(description.as_str()))
            .execute(conn)?,
        TaskChange::DueDate(due) => update
            .set(tasks::due_date.eq(format_timestamp(*due)))
            .execute(conn)?,
        TaskChange::Assignee(assignee) => update
            .set(tasks::assignee_email.eq(encode_assignee(assignee.as_ref())))
            .execute(conn)?,
    };
    expect_rows(updated, || {
        format!("Tasks({board}, {}, {task})", ordinal.as_i64())
    })
}

fn delete_task(
    conn: &mut SqliteConnection,
    board: BoardId,
    ordinal: ColumnOrdinal,
    task: TaskId,
) -> BoardStoreResult<()> {
    let deleted = diesel::delete(
        tasks::table
            .filter(tasks::board_id.eq(sql_id(board.value())?))
            .filter(tasks::ordinal.eq(ordinal.as_i64()))
            .filter(tasks::task_id.eq(sql_id(task.value())?)),
    )
    .execute(conn)?;
    expect_rows(deleted, || {
        format!("Tasks({board}, {}, {task})", ordinal.as_i64())
    })
}

fn expect_rows(affected: usize, describe: impl FnOnce() -> String) -> BoardStoreResult<()> {
    if affected == 0 {
        return Err(BoardStoreError::MissingRow(describe()));
    }
    Ok(())
}

fn sql_id(value: u64) -> BoardStoreResult<i64> {
    i64::try_from(value).map_err(|_| {
        BoardStoreError::CorruptRow(format!("identifier {value} exceeds the storage range"))
    })
}

fn encode_assignee(assignee: Option<&EmailAddress>) -> &str {
    assignee.map_or("", EmailAddress::as_str)
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn corrupt(context: &str, err: impl fmt::Display) -> BoardStoreError {
    BoardStoreError::CorruptRow(format!("{context}: {err}"))
}

fn parse_timestamp(raw: &str) -> BoardStoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| corrupt(&format!("timestamp '{raw}'"), err))
}

fn decode_board_id(raw: i64) -> BoardStoreResult<BoardId> {
    u64::try_from(raw)
        .map(BoardId::new)
        .map_err(|err| corrupt(&format!("board id {raw}"), err))
}

fn decode_email(raw: &str) -> BoardStoreResult<EmailAddress> {
    EmailAddress::new(raw).map_err(|err| corrupt("email", err))
}

fn decode_ordinal(raw: i64) -> BoardStoreResult<ColumnOrdinal> {
    ColumnOrdinal::try_from(raw).map_err(|err| corrupt("ordinal", err))
}

fn decode_board(record: BoardRecord) -> BoardStoreResult<PersistedBoardData> {
    Ok(PersistedBoardData {
        id: decode_board_id(record.id)?,
        name: BoardName::new(&record.name).map_err(|err| corrupt("board name", err))?,
        owner: decode_email(&record.owner_email)?,
    })
}

fn decode_member(record: MemberRecord) -> BoardStoreResult<MemberRow> {
    Ok(MemberRow {
        board: decode_board_id(record.board_id)?,
        email: decode_email(&record.email)?,
    })
}

fn decode_column(record: ColumnRecord) -> BoardStoreResult<ColumnRow> {
    Ok(ColumnRow {
        board: decode_board_id(record.board_id)?,
        ordinal: decode_ordinal(record.ordinal)?,
        limit: WipLimit::from_raw(record.tasks_limit).map_err(|err| corrupt("column limit", err))?,
    })
}

fn decode_task(record: TaskRecord) -> BoardStoreResult<TaskRow> {
    let TaskRecord {
        board_id,
        ordinal,
        task_id,
        assignee_email,
        title,
        description,
        due_date,
        creation_time,
    } = record;
    let assignee = if assignee_email.is_empty() {
        None
    } else {
        Some(decode_email(&assignee_email)?)
    };
    Ok(TaskRow {
        board: decode_board_id(board_id)?,
        ordinal: decode_ordinal(ordinal)?,
        task: PersistedTaskData {
            id: u64::try_from(task_id)
                .map(TaskId::new)
                .map_err(|err| corrupt(&format!("task id {task_id}"), err))?,
            created_at: parse_timestamp(&creation_time)?,
            due_date: parse_timestamp(&due_date)?,
            title: TaskTitle::new(title).map_err(|err| corrupt("task title", err))?,
            description: TaskDescription::new(description)
                .map_err(|err| corrupt("task description", err))?,
            assignee,
        },
    })
}
