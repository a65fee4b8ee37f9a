pub mod health;
pub mod users;
pub mod vr_nugget;

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use serde_json::json;

use crate::db::PersistError;
use crate::state::AppState;

pub const MISSING_FIELDS: &str = "MISSING_FIELDS";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const DUPLICATE_ENTRY: &str = "DUPLICATE_ENTRY";
pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
pub const CONFIG_NOT_LOADED: &str = "CONFIG_NOT_LOADED";
pub const INVALID_BODY: &str = "INVALID_BODY";
pub const ANSWER_TOO_LONG: &str = "ANSWER_TOO_LONG";

/// All HTTP routes of the study backend
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(health::index))
    .route("/health", get(health::health))
    .route("/health/full", get(health::health_full))
    .route("/db/health", get(health::db_health))
    .route("/create-new-user", get(users::create_new_user))
    .route("/get-user", get(users::get_user))
    .route("/vr-nugget-results", post(vr_nugget::submit_vr_nugget_result))
    .route("/knowledge-test-config", get(knowledge_test::knowledge_test_config))
    .route("/knowledge-test-answer", post(knowledge_test::submit_knowledge_test_answer))
    .with_state(state)
}

/// JSON error body: `{ "error": ..., "errorCode": ... }`
pub fn json_error(status: StatusCode, error: &str, code: &str) -> Response {
  (
    status,
    Json(json!({
      "error": error,
      "errorCode": code,
    })),
  )
    .into_response()
}

/// Malformed or wrongly typed JSON body, reported as 400 with the usual error shape
pub fn json_rejection(rejection: JsonRejection) -> Response {
  let message = rejection.body_text();
  tracing::debug!("Rejected request body: {}", message);
  json_error(StatusCode::BAD_REQUEST, &message, INVALID_BODY)
}

/// Translate a failed result insert into a response.
///
/// Duplicates are expected (participants retrying) and only logged at info.
pub fn persist_error_response(err: &PersistError) -> Response {
  match err {
    PersistError::DuplicateSubmission { user_id } => {
      tracing::info!("Duplicate entry for user_id: {}", user_id);
      (
        StatusCode::CONFLICT,
        Json(json!({
          "error": "A test result for this user already exists.",
          "errorCode": DUPLICATE_ENTRY,
          "details": err.to_string(),
        })),
      )
        .into_response()
    }
    PersistError::Database(_) | PersistError::Unavailable(_) => {
      tracing::error!("Database error: {}", err);
      json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to insert data", DATABASE_ERROR)
    }
  }
}

#[cfg(test)]
pub(crate) mod test_support {
  use axum_test::TestServer;
  use tempfile::TempDir;

  use super::router;
  use crate::knowledge_test::TestDefinition;
  use crate::state::AppState;
  use crate::testing::TestEnv;

  /// Server over a fresh database; keep the `TempDir` alive for the test
  pub fn server(definition: Option<TestDefinition>) -> (TempDir, AppState, TestServer) {
    let (temp, pool) = TestEnv::new().unwrap().into_pool();
    let state = AppState::new(pool, definition);
    let server = TestServer::new(router(state.clone())).unwrap();
    (temp, state, server)
  }

  pub fn definition(correct_answer: &str) -> TestDefinition {
    TestDefinition {
      card_pool: vec![
        serde_json::json!({"id": 1, "label": "Hammer"}),
        serde_json::json!({"id": 2, "label": "grab"}),
      ],
      correct_answer: correct_answer.to_string(),
    }
  }
}
