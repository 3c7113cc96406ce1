//! Assessment facade: runs the full pipeline and assembles the
//! JSON-serialisable result with its documented output precision.

use serde::{Deserialize, Serialize};
use vitalyx_common::entities::{BehavioralProfile, BiomarkerPanel};
use vitalyx_common::error::Result;
use vitalyx_common::risk_config::RiskConfig;

use crate::domains::DomainIndices;
use crate::economics::{self, EconomicImpact};
use crate::projection::{self, EventProjection};
use crate::scenario::{self, ScenarioDelta, ScenarioOverrides};
use crate::scorer::{self, RiskLevel, ScoredPanel};
use crate::session::BaselineRecord;
use crate::uncertainty::{self, UncertaintyEstimate};

// Biological-age mapping: composite 0.35 is age-neutral, full-scale
// composite displacement spans ±35 years.
const BIO_AGE_PIVOT: f64 = 0.35;
const BIO_AGE_SCALE: f64 = 35.0;

/// The complete assessment returned to collaborators and the transport
/// layer. Index values carry 2 decimals, percentages 1–2, scores integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub risk_vector: DomainIndices,
    pub interaction_flags: Vec<String>,
    pub biological_age_delta: i32,
    pub event_probability_projection: EventProjection,
    pub risk_uncertainty: UncertaintyEstimate,
    pub economic_impact: EconomicImpact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioDelta>,
}

/// Deterministic risk-scoring engine. Stateless apart from its
/// configuration; safe to share across requests.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Score a panel and assemble the full assessment.
    pub fn assess(
        &self,
        panel: &BiomarkerPanel,
        behavioral: Option<&BehavioralProfile>,
    ) -> Result<RiskAssessment> {
        let scored = scorer::score_panel(panel, behavioral, &self.config)?;
        let assessment = self.assemble(panel, behavioral, scored, None);
        tracing::info!(
            score = assessment.risk_score,
            level = %assessment.risk_level,
            completeness = assessment.risk_uncertainty.data_completeness,
            "assessment computed"
        );
        Ok(assessment)
    }

    /// Counterfactual assessment against an established baseline. The
    /// returned assessment describes the scenario panel, with the
    /// baseline-vs-scenario delta attached.
    pub fn simulate(
        &self,
        baseline: &BaselineRecord,
        overrides: &ScenarioOverrides,
    ) -> Result<RiskAssessment> {
        let (_, scenario_scored, delta) = scenario::simulate(
            &baseline.biomarkers,
            baseline.behavioral.as_ref(),
            overrides,
            &self.config,
        )?;

        let scenario_panel = baseline.biomarkers.merge(&overrides.biomarkers);
        let scenario_behavioral = match (baseline.behavioral.as_ref(), overrides.behavioral.as_ref())
        {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (Some(base), None) => Some(base.clone()),
            (None, Some(over)) => Some(over.clone()),
            (None, None) => None,
        };

        Ok(self.assemble(
            &scenario_panel,
            scenario_behavioral.as_ref(),
            scenario_scored,
            Some(delta),
        ))
    }

    fn assemble(
        &self,
        panel: &BiomarkerPanel,
        behavioral: Option<&BehavioralProfile>,
        scored: ScoredPanel,
        scenario: Option<ScenarioDelta>,
    ) -> RiskAssessment {
        let projection = projection::project(
            scored.breakdown.composite,
            scored.risk_score,
            &scored.indices,
            &self.config.projection,
        );
        let filled = scorer::filled_field_count(panel, behavioral);
        let uncertainty = uncertainty::estimate(filled, scorer::expected_field_count());
        let economic_impact = economics::estimate(scored.risk_score, &self.config.economics);
        let biological_age_delta =
            ((scored.breakdown.composite - BIO_AGE_PIVOT) * BIO_AGE_SCALE).round() as i32;

        RiskAssessment {
            risk_score: scored.risk_score,
            risk_level: scored.risk_level,
            risk_vector: scored.indices.rounded(),
            interaction_flags: scored.breakdown.interaction_flags,
            biological_age_delta,
            event_probability_projection: projection,
            risk_uncertainty: uncertainty,
            economic_impact,
            scenario,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalyx_common::error::VitalyxError;

    fn engine() -> RiskEngine {
        RiskEngine::default()
    }

    /// The documented reference scenario: mid-range elevated lipids, mildly
    /// low HDL, normal liver enzymes, sub-threshold HbA1c.
    fn reference_panel() -> BiomarkerPanel {
        BiomarkerPanel {
            ldl: Some(150.0),
            triglycerides: Some(180.0),
            hdl: Some(38.0),
            ast: Some(20.0),
            alt: Some(30.0),
            hba1c: Some(5.5),
            hs_crp: Some(1.2),
            vitamin_d: Some(40.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_panel_moderate_or_lower() {
        let assessment = engine().assess(&reference_panel(), None).unwrap();

        let cardio = assessment.risk_vector.cardiovascular.unwrap();
        assert!(cardio >= 0.3 && cardio <= 0.5, "cardio {cardio}");
        assert!(assessment.risk_vector.hepatic.unwrap() < 0.1);
        assert!(assessment.risk_vector.metabolic.unwrap() < 0.1);

        assert!(
            (25..=55).contains(&assessment.risk_score),
            "score {}",
            assessment.risk_score
        );
        assert!(matches!(
            assessment.risk_level,
            RiskLevel::Low | RiskLevel::Moderate
        ));
    }

    #[test]
    fn test_empty_inputs_surface_insufficient_data() {
        let err = engine().assess(&BiomarkerPanel::default(), None).unwrap_err();
        assert!(matches!(err, VitalyxError::InsufficientData));
    }

    #[test]
    fn test_uncertainty_tracks_completeness() {
        let assessment = engine().assess(&reference_panel(), None).unwrap();
        // 8 of 14 expected fields were available.
        assert!((assessment.risk_uncertainty.data_completeness - 0.57).abs() < 1e-12);
        assert!((assessment.risk_uncertainty.model_confidence - 0.76).abs() < 1e-12);
    }

    #[test]
    fn test_risk_vector_rounded_to_two_decimals() {
        let assessment = engine().assess(&reference_panel(), None).unwrap();
        for value in assessment.risk_vector.as_array().into_iter().flatten() {
            assert!(((value * 100.0).round() / 100.0 - value).abs() < 1e-12);
        }
    }

    #[test]
    fn test_simulation_attaches_delta_and_identity_holds() {
        let baseline = BaselineRecord {
            biomarkers: reference_panel(),
            behavioral: None,
            demographics: None,
            established_at: chrono::Utc::now(),
        };
        let eng = engine();
        let baseline_assessment = eng.assess(&baseline.biomarkers, None).unwrap();
        let scenario = eng
            .simulate(&baseline, &ScenarioOverrides::default())
            .unwrap();
        let delta = scenario.scenario.expect("delta attached");
        assert_eq!(delta.baseline_score, baseline_assessment.risk_score);
        assert_eq!(delta.simulated_score, baseline_assessment.risk_score);
    }

    #[test]
    fn test_assessment_serialises_contract_keys() {
        let assessment = engine().assess(&reference_panel(), None).unwrap();
        let json = serde_json::to_value(&assessment).unwrap();
        assert!(json["risk_score"].is_u64());
        assert_eq!(json["risk_level"], "Low Risk");
        assert!(json["risk_vector"]["cardiovascular"].is_f64());
        assert!(json["risk_vector"]["behavioral"].is_null());
        assert!(json["event_probability_projection"]["5_year"]["risk_percent"].is_f64());
        assert!(json["risk_uncertainty"]["model_confidence"].is_f64());
        assert!(json["economic_impact"]["annual_cost"].is_u64());
        // No scenario delta on a plain assessment.
        assert!(json.get("scenario").is_none());
    }

    #[test]
    fn test_biological_age_delta_sign() {
        let healthy = BiomarkerPanel {
            fasting_glucose: Some(90.0),
            triglycerides: Some(100.0),
            hdl: Some(65.0),
            ldl: Some(95.0),
            hba1c: Some(5.0),
            hs_crp: Some(0.5),
            ast: Some(22.0),
            alt: Some(20.0),
            vitamin_d: Some(50.0),
            esr: Some(8.0),
        };
        let behavioral = BehavioralProfile {
            sleep_hours: Some(8.0),
            stress_level: Some(2),
            exercise_days: Some(5),
            alcohol_frequency: Some(1.0),
        };
        let assessment = engine().assess(&healthy, Some(&behavioral)).unwrap();
        assert!(assessment.biological_age_delta < 0);

        let assessment = engine()
            .assess(
                &BiomarkerPanel {
                    alt: Some(300.0),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert!(assessment.biological_age_delta > 0);
    }
}
