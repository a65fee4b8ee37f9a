//! Knowledge test result storage

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::Serialize;

use super::PersistError;
use crate::scoring::ScoreResult;

/// Row of `knowledge_test_results` as persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredKnowledgeTestResult {
  pub user_id: i64,
  /// Rounded total error, `None` for an unbounded score
  pub total_error: Option<i64>,
  pub levenshtein_distance: i64,
  pub jaccard_similarity_of_objects: f64,
  pub jaccard_similarity_of_activities: f64,
  pub invalid: bool,
  pub created_at: String,
}

/// Persist a computed score; at most one row per user.
pub fn insert_knowledge_test_result(
  conn: &Connection,
  user_id: i64,
  score: &ScoreResult,
) -> std::result::Result<(), PersistError> {
  conn
    .execute(
      r#"
    INSERT INTO knowledge_test_results
      (user_id, total_error, levenshtein_distance, jaccard_similarity_of_objects,
       jaccard_similarity_of_activities, invalid, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
      params![
        user_id,
        score.rounded_total_error(),
        score.edit_distance as i64,
        score.jaccard_objects,
        score.jaccard_verbs,
        score.invalid,
        Utc::now().to_rfc3339(),
      ],
    )
    .map_err(|e| PersistError::from_insert(e, user_id))?;
  Ok(())
}

pub fn get_knowledge_test_result(
  conn: &Connection,
  user_id: i64,
) -> Result<Option<StoredKnowledgeTestResult>> {
  conn
    .query_row(
      r#"
    SELECT user_id, total_error, levenshtein_distance, jaccard_similarity_of_objects,
           jaccard_similarity_of_activities, invalid, created_at
    FROM knowledge_test_results
    WHERE user_id = ?1
    "#,
      params![user_id],
      |row| {
        Ok(StoredKnowledgeTestResult {
          user_id: row.get(0)?,
          total_error: row.get(1)?,
          levenshtein_distance: row.get(2)?,
          jaccard_similarity_of_objects: row.get(3)?,
          jaccard_similarity_of_activities: row.get(4)?,
          invalid: row.get(5)?,
          created_at: row.get(6)?,
        })
      },
    )
    .optional()
}
