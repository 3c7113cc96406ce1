//! Session lifecycle and trend history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use vitalyx_common::error::{ApiError, VitalyxError};

use crate::state::SharedState;

/// GET /api/sessions/{id}/history — past scores for trend display.
pub async fn session_history(
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.sessions.history(session_id)?;
    Ok(Json(history))
}

/// DELETE /api/sessions/{id} — tear down the session and its baseline.
pub async fn end_session(
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if state.sessions.end_session(session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError(VitalyxError::MissingBaseline(session_id)))
    }
}
