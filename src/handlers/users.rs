use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{json_error, DATABASE_ERROR, MISSING_FIELDS, NOT_FOUND};
use crate::db::{self, try_lock};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GetUserQuery {
  pub user_id: Option<String>,
}

/// GET /create-new-user
pub async fn create_new_user(State(state): State<AppState>) -> Response {
  let conn = match try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => {
      return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create new user", DATABASE_ERROR)
    }
  };

  match db::create_user(&conn) {
    Ok(user_id) => {
      tracing::debug!("Created user {}", user_id);
      (
        StatusCode::CREATED,
        Json(json!({
          "message": "User created successfully",
          "user_id": user_id,
        })),
      )
        .into_response()
    }
    Err(e) => {
      tracing::error!("Database error: {}", e);
      json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create new user", DATABASE_ERROR)
    }
  }
}

/// GET /get-user?user_id=N
pub async fn get_user(
  State(state): State<AppState>,
  Query(query): Query<GetUserQuery>,
) -> Response {
  let Some(user_id) = query.user_id.as_deref().and_then(|id| id.trim().parse::<i64>().ok()) else {
    return json_error(
      StatusCode::BAD_REQUEST,
      "Missing required field. Please provide: user_id",
      MISSING_FIELDS,
    );
  };

  let conn = match try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => {
      return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve user", DATABASE_ERROR)
    }
  };

  match db::get_user(&conn, user_id) {
    Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
    Ok(None) => json_error(StatusCode::NOT_FOUND, "User not found", NOT_FOUND),
    Err(e) => {
      tracing::error!("Database error: {}", e);
      json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve user", DATABASE_ERROR)
    }
  }
}
