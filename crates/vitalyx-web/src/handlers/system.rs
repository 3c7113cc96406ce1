//! Service status.

use axum::extract::State;
use axum::Json;

use crate::state::SharedState;

/// GET /api/health
pub async fn health(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "narrative_enabled": state.narrative.is_enabled(),
    }))
}
