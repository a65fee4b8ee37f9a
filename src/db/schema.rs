use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // One row per participant in every result table: user_id is the primary key
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS users (
      user_id INTEGER PRIMARY KEY AUTOINCREMENT,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS vr_nugget_results (
      user_id INTEGER PRIMARY KEY,
      duration_in_seconds REAL NOT NULL,
      number_of_errors INTEGER NOT NULL,
      number_of_helps INTEGER NOT NULL,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS vr_nugget_user_errors (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      step_name TEXT NOT NULL,
      error_message TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS vr_nugget_user_helps (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      step_name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS knowledge_test_results (
      user_id INTEGER PRIMARY KEY,
      -- NULL when the total error is unbounded (no object or verb overlap)
      total_error INTEGER,
      levenshtein_distance INTEGER NOT NULL,
      jaccard_similarity_of_objects REAL NOT NULL,
      jaccard_similarity_of_activities REAL NOT NULL,
      invalid INTEGER NOT NULL,
      created_at TEXT NOT NULL
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_vr_nugget_user_errors_user_id ON vr_nugget_user_errors(user_id);
    CREATE INDEX IF NOT EXISTS idx_vr_nugget_user_helps_user_id ON vr_nugget_user_helps(user_id);
    "#,
  )?;
  Ok(())
}
