//! Scenario simulation against the session baseline.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitalyx_common::entities::{BehavioralProfile, BiomarkerPanel};
use vitalyx_common::error::ApiError;
use vitalyx_engine::{RiskAssessment, ScenarioOverrides};

use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    pub session_id: Uuid,
    /// Sparse marker overrides; unspecified fields inherit the baseline.
    #[serde(default)]
    pub biomarkers: BiomarkerPanel,
    #[serde(default)]
    pub behavioral: Option<BehavioralProfile>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

/// POST /api/scenarios — rescore the baseline under a sparse override set.
/// The baseline itself is never modified.
pub async fn simulate_scenario(
    State(state): State<SharedState>,
    Json(req): Json<ScenarioRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let baseline = state.sessions.baseline(req.session_id)?;

    let overrides = ScenarioOverrides {
        biomarkers: req.biomarkers,
        behavioral: req.behavioral,
    };
    let assessment = state.engine.simulate(&baseline, &overrides)?;

    Ok(Json(ScenarioResponse {
        session_id: req.session_id,
        assessment,
    }))
}
