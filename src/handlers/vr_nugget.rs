//! VR nugget completion telemetry endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{json_error, json_rejection, persist_error_response, MISSING_FIELDS};
use crate::db::{self, try_lock, PersistError, VrNuggetResult};
use crate::state::AppState;

/// Request body; every field is required
#[derive(Debug, Default, Deserialize)]
pub struct VrNuggetRequest {
    pub user_id: Option<i64>,
    pub duration_in_seconds: Option<f64>,
    pub number_of_errors: Option<i64>,
    pub number_of_helps: Option<i64>,
    pub error_stepnames: Option<Vec<String>>,
    pub error_messages: Option<Vec<String>>,
    pub help_stepnames: Option<Vec<String>>,
}

impl VrNuggetRequest {
    fn into_result(self) -> Option<VrNuggetResult> {
        Some(VrNuggetResult {
            user_id: self.user_id?,
            duration_in_seconds: self.duration_in_seconds?,
            number_of_errors: self.number_of_errors?,
            number_of_helps: self.number_of_helps?,
            error_stepnames: self.error_stepnames?,
            error_messages: self.error_messages?,
            help_stepnames: self.help_stepnames?,
        })
    }
}

/// POST /vr-nugget-results
pub async fn submit_vr_nugget_result(
    State(state): State<AppState>,
    payload: Result<Json<VrNuggetRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(rejection),
    };

    let Some(result) = request.into_result() else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "Missing required fields. Please provide: user_id, duration_in_seconds, number_of_errors, number_of_helps, error_stepnames, error_messages, help_stepnames",
            MISSING_FIELDS,
        );
    };

    let stored = try_lock(&state.db)
        .map_err(PersistError::from)
        .and_then(|conn| db::insert_vr_nugget_result(&conn, &result));

    match stored {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "message": "VR nugget result created successfully" })),
        )
            .into_response(),
        Err(e) => persist_error_response(&e),
    }
}
