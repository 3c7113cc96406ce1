//! Axum router — maps all URL paths to handlers.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    assessments::{create_assessment, upload_report},
    scenarios::simulate_scenario,
    sessions::{end_session, session_history},
    system::health,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Ingest and score
        .route("/api/assessments", post(create_assessment))
        .route("/api/assessments/upload", post(upload_report))

        // Scenario simulation against the session baseline
        .route("/api/scenarios", post(simulate_scenario))

        // Session lifecycle
        .route("/api/sessions/{id}/history", get(session_history))
        .route("/api/sessions/{id}", delete(end_session))

        .route("/api/health", get(health))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
