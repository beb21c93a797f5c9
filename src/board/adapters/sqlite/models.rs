//! Diesel row models for board persistence.

use super::schema::{board_members, boards, columns, tasks};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

/// Query result row for board records.
#[derive(Debug, Clone, QueryableByName)]
pub struct BoardRecord {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub owner_email: String,
}

/// Insert model for board records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRecord<'a> {
    pub id: i64,
    pub name: &'a str,
    pub owner_email: &'a str,
}

/// Query result row for membership records.
#[derive(Debug, Clone, QueryableByName)]
pub struct MemberRecord {
    #[diesel(sql_type = BigInt)]
    pub board_id: i64,
    #[diesel(sql_type = Text)]
    pub email: String,
}

/// Insert model for membership records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_members)]
pub struct NewMemberRecord<'a> {
    pub board_id: i64,
    pub email: &'a str,
}

/// Query result row for column records.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct ColumnRecord {
    #[diesel(sql_type = BigInt)]
    pub board_id: i64,
    #[diesel(sql_type = BigInt)]
    pub ordinal: i64,
    #[diesel(sql_type = BigInt)]
    pub tasks_limit: i64,
}

/// Insert model for column records.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = columns)]
pub struct NewColumnRecord {
    pub board_id: i64,
    pub ordinal: i64,
    pub tasks_limit: i64,
}

/// Query result row for task records.
#[derive(Debug, Clone, QueryableByName)]
pub struct TaskRecord {
    #[diesel(sql_type = BigInt)]
    pub board_id: i64,
    #[diesel(sql_type = BigInt)]
    pub ordinal: i64,
    #[diesel(sql_type = BigInt)]
    pub task_id: i64,
    #[diesel(sql_type = Text)]
    pub assignee_email: String,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub description: String,
    #[diesel(sql_type = Text)]
    pub due_date: String,
    #[diesel(sql_type = Text)]
    pub creation_time: String,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRecord {
    pub board_id: i64,
    pub ordinal: i64,
    pub task_id: i64,
    pub assignee_email: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub creation_time: String,
}
