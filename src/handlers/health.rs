//! Liveness and database health checks.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::db::{self, try_lock};
use crate::state::AppState;

pub async fn index() -> &'static str {
  "Hello from the VR study backend!"
}

/// Process liveness, used by the container health check
pub async fn health() -> impl IntoResponse {
  Json(json!({ "status": "ok" }))
}

fn check_db(state: &AppState) -> Result<(), String> {
  let conn = try_lock(&state.db).map_err(|e| e.to_string())?;
  db::ping(&conn).map_err(|e| e.to_string())
}

pub async fn db_health(State(state): State<AppState>) -> impl IntoResponse {
  match check_db(&state) {
    Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
    Err(message) => {
      tracing::error!("DB health failed: {}", message);
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "error", "message": message })),
      )
    }
  }
}

/// Liveness with the database folded in
pub async fn health_full(State(state): State<AppState>) -> impl IntoResponse {
  match check_db(&state) {
    Ok(()) => (
      StatusCode::OK,
      Json(json!({ "status": "ok", "db": { "ok": true } })),
    ),
    Err(message) => (
      StatusCode::SERVICE_UNAVAILABLE,
      Json(json!({ "status": "degraded", "db": { "ok": false, "error": message } })),
    ),
  }
}
