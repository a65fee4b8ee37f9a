//! Study participants

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: i64,
    pub created_at: String,
}

/// Register a new participant and return the assigned id
pub fn create_user(conn: &Connection) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (created_at) VALUES (?1)",
        params![Utc::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    conn.query_row(
        "SELECT user_id, created_at FROM users WHERE user_id = ?1",
        params![user_id],
        |row| {
            Ok(User {
                user_id: row.get(0)?,
                created_at: row.get(1)?,
            })
        },
    )
    .optional()
}
