//! Ingest-and-score: the primary assessment endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitalyx_common::entities::{BehavioralProfile, BiomarkerPanel, Demographics};
use vitalyx_common::error::ApiError;
use vitalyx_engine::RiskAssessment;
use vitalyx_ingestion::extract_text_from_pdf;
use vitalyx_llm::Narrative;

use crate::clinical;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    /// Session to establish or replace the baseline for. A fresh session is
    /// created when absent.
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub biomarkers: BiomarkerPanel,
    #[serde(default)]
    pub demographics: Option<Demographics>,
    #[serde(default)]
    pub behavioral: Option<BehavioralProfile>,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub session_id: Uuid,
    pub biomarkers: BiomarkerPanel,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    pub risk_projection: &'static str,
    pub clinical_summary: String,
    pub recommendations: Vec<&'static str>,
    pub intervention_plan: Vec<clinical::InterventionDomain>,
    pub narrative: Narrative,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_confidence: Option<f64>,
}

/// POST /api/assessments — score a structured panel and establish it as the
/// session baseline.
pub async fn create_assessment(
    State(state): State<SharedState>,
    Json(req): Json<AssessmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = run_assessment(
        &state,
        req.session_id,
        req.biomarkers,
        req.demographics,
        req.behavioral,
        None,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/assessments/upload — extract a panel from raw PDF bytes, then
/// follow the same scoring path.
pub async fn upload_report(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let text = extract_text_from_pdf(&body)?;
    let outcome = state.extractor.extract(&text);
    tracing::info!(
        markers = outcome.panel.filled_count(),
        confidence = outcome.confidence,
        "report ingested"
    );
    let response = run_assessment(
        &state,
        None,
        outcome.panel,
        None,
        None,
        Some(outcome.confidence),
    )
    .await?;
    Ok(Json(response))
}

async fn run_assessment(
    state: &SharedState,
    session_id: Option<Uuid>,
    biomarkers: BiomarkerPanel,
    demographics: Option<Demographics>,
    behavioral: Option<BehavioralProfile>,
    extraction_confidence: Option<f64>,
) -> Result<AssessmentResponse, ApiError> {
    let assessment = state.engine.assess(&biomarkers, behavioral.as_ref())?;

    let session_id = session_id.unwrap_or_else(Uuid::new_v4);
    state.sessions.establish_baseline(
        session_id,
        biomarkers.clone(),
        behavioral.clone(),
        demographics.clone(),
    );
    state
        .sessions
        .record_score(session_id, assessment.risk_score, assessment.risk_level);

    let narrative = state
        .narrative
        .generate(&biomarkers, demographics.as_ref(), &assessment)
        .await;

    Ok(AssessmentResponse {
        session_id,
        risk_projection: clinical::trajectory_note(assessment.risk_score),
        clinical_summary: clinical::clinical_summary(&biomarkers),
        recommendations: clinical::recommendations(assessment.risk_level),
        intervention_plan: clinical::intervention_plan(&assessment.risk_vector),
        narrative,
        extraction_confidence,
        biomarkers,
        assessment,
    })
}
