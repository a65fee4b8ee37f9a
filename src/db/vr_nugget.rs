//! VR training module ("nugget") completion telemetry

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use super::PersistError;

/// Telemetry reported once a participant finishes the VR nugget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VrNuggetResult {
    pub user_id: i64,
    pub duration_in_seconds: f64,
    pub number_of_errors: i64,
    pub number_of_helps: i64,
    /// Step names where an error occurred, paired by index with `error_messages`
    pub error_stepnames: Vec<String>,
    pub error_messages: Vec<String>,
    pub help_stepnames: Vec<String>,
}

/// Store the summary row plus one row per error and help step.
///
/// All rows are written in one transaction. A second result for the same
/// user fails with `DuplicateSubmission` and writes nothing.
pub fn insert_vr_nugget_result(
    conn: &Connection,
    result: &VrNuggetResult,
) -> Result<(), PersistError> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        r#"
    INSERT INTO vr_nugget_results (user_id, duration_in_seconds, number_of_errors, number_of_helps, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
        params![
            result.user_id,
            result.duration_in_seconds,
            result.number_of_errors,
            result.number_of_helps,
            Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| PersistError::from_insert(e, result.user_id))?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO vr_nugget_user_errors (user_id, step_name, error_message) VALUES (?1, ?2, ?3)",
        )?;
        for (index, step_name) in result.error_stepnames.iter().enumerate() {
            let message = result
                .error_messages
                .get(index)
                .map(String::as_str)
                .unwrap_or("");
            stmt.execute(params![result.user_id, step_name, message])?;
        }

        let mut stmt = tx
            .prepare("INSERT INTO vr_nugget_user_helps (user_id, step_name) VALUES (?1, ?2)")?;
        for step_name in &result.help_stepnames {
            stmt.execute(params![result.user_id, step_name])?;
        }
    }

    tx.commit()?;
    Ok(())
}

pub fn get_vr_nugget_result(
    conn: &Connection,
    user_id: i64,
) -> rusqlite::Result<Option<VrNuggetResult>> {
    let summary = conn
        .query_row(
            r#"
    SELECT duration_in_seconds, number_of_errors, number_of_helps
    FROM vr_nugget_results
    WHERE user_id = ?1
    "#,
            params![user_id],
            |row| {
                Ok((
                    row.get::<_, f64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )
        .optional()?;

    let Some((duration_in_seconds, number_of_errors, number_of_helps)) = summary else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT step_name, error_message FROM vr_nugget_user_errors WHERE user_id = ?1 ORDER BY id",
    )?;
    let errors = stmt
        .query_map(params![user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let (error_stepnames, error_messages) = errors.into_iter().unzip();

    let mut stmt =
        conn.prepare("SELECT step_name FROM vr_nugget_user_helps WHERE user_id = ?1 ORDER BY id")?;
    let help_stepnames = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    Ok(Some(VrNuggetResult {
        user_id,
        duration_in_seconds,
        number_of_errors,
        number_of_helps,
        error_stepnames,
        error_messages,
        help_stepnames,
    }))
}
