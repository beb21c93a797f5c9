//! Diesel row models for account persistence.

use super::schema::users;
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, QueryableByName)]
pub struct UserRow {
    /// Normalised email.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub email: String,
    /// Stored password.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub password: String,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    /// Normalised email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
}
