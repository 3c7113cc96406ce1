//! Narrative report generation over the deterministic engine output.
//!
//! The generator is a capability with two outcomes: a structured free-text
//! report, or an explicit Unavailable variant carrying fixed fallback text.
//! It never propagates an error upward and never fails an assessment.

use std::sync::Arc;

use serde::Serialize;
use vitalyx_common::entities::{BiomarkerPanel, Demographics};
use vitalyx_engine::RiskAssessment;

use crate::backend::{LlmBackend, LlmRequest, Message};

/// Fixed fallback emitted whenever no backend is configured or the call
/// fails for any reason.
pub const FALLBACK_TEXT: &str = "AI narrative unavailable. Deterministic engine active.";

const MAX_TOKENS: u32 = 1200;
const TEMPERATURE: f32 = 0.3;

/// Outcome of a narrative request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Narrative {
    Generated { text: String, model: String },
    Unavailable { fallback: String },
}

impl Narrative {
    pub fn text(&self) -> &str {
        match self {
            Narrative::Generated { text, .. } => text,
            Narrative::Unavailable { fallback } => fallback,
        }
    }

    fn unavailable() -> Narrative {
        Narrative::Unavailable {
            fallback: FALLBACK_TEXT.to_string(),
        }
    }
}

/// Wraps an optional LLM backend; without one, every request degrades to
/// the fallback.
pub struct NarrativeGenerator {
    backend: Option<Arc<dyn LlmBackend>>,
}

impl NarrativeGenerator {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Generate the five-section narrative. Infallible by contract.
    pub async fn generate(
        &self,
        panel: &BiomarkerPanel,
        demographics: Option<&Demographics>,
        assessment: &RiskAssessment,
    ) -> Narrative {
        let Some(backend) = &self.backend else {
            return Narrative::unavailable();
        };

        let prompt = build_prompt(panel, demographics, assessment);
        let request = LlmRequest {
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            model: None,
            max_tokens: Some(MAX_TOKENS),
            temperature: Some(TEMPERATURE),
        };

        match backend.complete(request).await {
            Ok(resp) if !resp.content.trim().is_empty() => Narrative::Generated {
                text: resp.content.trim().to_string(),
                model: resp.model,
            },
            Ok(_) => {
                tracing::warn!(model = backend.model_id(), "empty narrative response");
                Narrative::unavailable()
            }
            Err(err) => {
                tracing::warn!(model = backend.model_id(), error = %err, "narrative generation failed");
                Narrative::unavailable()
            }
        }
    }
}

fn build_prompt(
    panel: &BiomarkerPanel,
    demographics: Option<&Demographics>,
    assessment: &RiskAssessment,
) -> String {
    let panel_json = serde_json::to_string_pretty(panel).unwrap_or_default();
    let demographics_json = demographics
        .map(|d| serde_json::to_string_pretty(d).unwrap_or_default())
        .unwrap_or_else(|| "not provided".to_string());
    let assessment_json = serde_json::to_string_pretty(assessment).unwrap_or_default();

    format!(
        r#"You are a preventive medicine intelligence specialist.

Strict rules:
- Do NOT diagnose disease.
- Do NOT claim certainty.
- Emphasize risk gradients and physiological stress.
- Reference specific biomarker values.
- If key biomarkers are missing (data completeness {completeness}), explicitly mention reduced certainty.
- Highlight severe deviations (e.g., ALT > 250).

Biomarkers:
{panel_json}

Demographics:
{demographics_json}

Deterministic Risk Engine Output:
{assessment_json}

Respond in structured sections:

=== EXECUTIVE SUMMARY ===
4-6 sentence overview of risk profile.

=== DOMINANT RISK DOMAINS ===
Explain elevations using actual values.

=== MECHANISTIC INTERPRETATION ===
Describe physiological stress patterns.

=== TARGETED PREVENTIVE STRATEGY ===
Domain-specific interventions.

=== FOLLOW-UP INTELLIGENCE PLAN ===
Reassessment timeline adjusted to risk severity and data completeness.
"#,
        completeness = assessment.risk_uncertainty.data_completeness,
    )
}
