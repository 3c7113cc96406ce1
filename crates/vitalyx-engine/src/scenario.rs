//! What-if scenario simulation: counterfactual rescoring with ROI
//! classification.
//!
//! The baseline is immutable here — overrides are sparse-merged onto a copy
//! and both panels run through the same scorer.

use serde::{Deserialize, Serialize};
use vitalyx_common::entities::{BehavioralProfile, BiomarkerPanel};
use vitalyx_common::error::Result;
use vitalyx_common::risk_config::RiskConfig;

use crate::normalise::round2;
use crate::scorer::{score_panel, ScoredPanel};

/// Sparse override set: only named fields replace baseline values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioOverrides {
    #[serde(default)]
    pub biomarkers: BiomarkerPanel,
    #[serde(default)]
    pub behavioral: Option<BehavioralProfile>,
}

impl ScenarioOverrides {
    pub fn is_empty(&self) -> bool {
        self.biomarkers.is_empty()
            && self.behavioral.as_ref().map(|b| b.is_empty()).unwrap_or(true)
    }
}

/// Effect size of a simulated intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactMagnitude {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trajectory {
    Improving,
    Worsening,
    Stable,
}

/// Baseline-vs-scenario comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDelta {
    pub baseline_score: u8,
    pub simulated_score: u8,
    pub absolute_risk_reduction: u8,
    /// Signed percent change relative to the baseline score, 2 decimals;
    /// 0 when the baseline score is 0.
    pub relative_percent_change: f64,
    pub impact_magnitude: ImpactMagnitude,
    pub trajectory: Trajectory,
}

/// Classify the score movement between baseline and scenario.
pub fn classify_delta(baseline_score: u8, simulated_score: u8) -> ScenarioDelta {
    let delta = simulated_score as i16 - baseline_score as i16;

    let relative_percent_change = if baseline_score == 0 {
        0.0
    } else {
        round2(delta as f64 / baseline_score as f64 * 100.0)
    };

    let impact_magnitude = match delta.abs() {
        d if d > 20 => ImpactMagnitude::High,
        d if d > 10 => ImpactMagnitude::Moderate,
        _ => ImpactMagnitude::Low,
    };

    let trajectory = match delta {
        d if d < 0 => Trajectory::Improving,
        d if d > 0 => Trajectory::Worsening,
        _ => Trajectory::Stable,
    };

    ScenarioDelta {
        baseline_score,
        simulated_score,
        absolute_risk_reduction: (-delta).max(0) as u8,
        relative_percent_change,
        impact_magnitude,
        trajectory,
    }
}

/// Run the scorer twice — once on the untouched baseline, once on the merged
/// scenario panel — and classify the delta. Returns
/// (baseline result, scenario result, delta).
pub fn simulate(
    baseline: &BiomarkerPanel,
    baseline_behavioral: Option<&BehavioralProfile>,
    overrides: &ScenarioOverrides,
    config: &RiskConfig,
) -> Result<(ScoredPanel, ScoredPanel, ScenarioDelta)> {
    let scenario_panel = baseline.merge(&overrides.biomarkers);
    let scenario_behavioral = match (baseline_behavioral, overrides.behavioral.as_ref()) {
        (Some(base), Some(over)) => Some(base.merge(over)),
        (Some(base), None) => Some(base.clone()),
        (None, Some(over)) => Some(over.clone()),
        (None, None) => None,
    };

    let baseline_scored = score_panel(baseline, baseline_behavioral, config)?;
    let scenario_scored = score_panel(&scenario_panel, scenario_behavioral.as_ref(), config)?;
    let delta = classify_delta(baseline_scored.risk_score, scenario_scored.risk_score);

    tracing::info!(
        baseline = delta.baseline_score,
        simulated = delta.simulated_score,
        trajectory = ?delta.trajectory,
        "scenario simulated"
    );

    Ok((baseline_scored, scenario_scored, delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RiskConfig {
        RiskConfig::default()
    }

    fn elevated_panel() -> BiomarkerPanel {
        BiomarkerPanel {
            fasting_glucose: Some(150.0),
            triglycerides: Some(320.0),
            hdl: Some(34.0),
            ldl: Some(185.0),
            hba1c: Some(7.2),
            hs_crp: Some(6.0),
            ast: Some(95.0),
            alt: Some(120.0),
            vitamin_d: Some(18.0),
            esr: Some(40.0),
        }
    }

    #[test]
    fn test_empty_overrides_reproduce_baseline_exactly() {
        let (baseline, scenario, delta) = simulate(
            &elevated_panel(),
            None,
            &ScenarioOverrides::default(),
            &config(),
        )
        .unwrap();
        assert_eq!(baseline.risk_score, scenario.risk_score);
        assert_eq!(delta.absolute_risk_reduction, 0);
        assert_eq!(delta.relative_percent_change, 0.0);
        assert_eq!(delta.trajectory, Trajectory::Stable);
    }

    #[test]
    fn test_lipid_intervention_improves_trajectory() {
        let overrides = ScenarioOverrides {
            biomarkers: BiomarkerPanel {
                ldl: Some(100.0),
                triglycerides: Some(130.0),
                hs_crp: Some(0.8),
                ..Default::default()
            },
            behavioral: None,
        };
        let (baseline, scenario, delta) =
            simulate(&elevated_panel(), None, &overrides, &config()).unwrap();
        assert!(scenario.risk_score < baseline.risk_score);
        assert_eq!(delta.trajectory, Trajectory::Improving);
        assert!(delta.absolute_risk_reduction > 0);
        assert!(delta.relative_percent_change < 0.0);
    }

    #[test]
    fn test_simulation_never_mutates_baseline() {
        let baseline = elevated_panel();
        let before = baseline.clone();
        let overrides = ScenarioOverrides {
            biomarkers: BiomarkerPanel {
                ldl: Some(90.0),
                ..Default::default()
            },
            behavioral: None,
        };
        simulate(&baseline, None, &overrides, &config()).unwrap();
        assert_eq!(baseline, before);
    }

    #[test]
    fn test_worsening_scenario() {
        let mild = BiomarkerPanel {
            ldl: Some(120.0),
            hdl: Some(55.0),
            triglycerides: Some(130.0),
            ast: Some(25.0),
            alt: Some(25.0),
            ..Default::default()
        };
        let overrides = ScenarioOverrides {
            biomarkers: BiomarkerPanel {
                alt: Some(300.0),
                ast: Some(200.0),
                ..Default::default()
            },
            behavioral: None,
        };
        let (_, _, delta) = simulate(&mild, None, &overrides, &config()).unwrap();
        assert_eq!(delta.trajectory, Trajectory::Worsening);
        assert_eq!(delta.absolute_risk_reduction, 0);
    }

    #[test]
    fn test_magnitude_thresholds() {
        assert_eq!(classify_delta(50, 45).impact_magnitude, ImpactMagnitude::Low);
        assert_eq!(classify_delta(50, 39).impact_magnitude, ImpactMagnitude::Moderate);
        assert_eq!(classify_delta(50, 29).impact_magnitude, ImpactMagnitude::High);
        // Boundary: |delta| = 10 and 20 stay in the lower class.
        assert_eq!(classify_delta(50, 40).impact_magnitude, ImpactMagnitude::Low);
        assert_eq!(classify_delta(50, 30).impact_magnitude, ImpactMagnitude::Moderate);
    }

    #[test]
    fn test_relative_change_guards_zero_baseline() {
        let delta = classify_delta(0, 15);
        assert_eq!(delta.relative_percent_change, 0.0);
        assert_eq!(delta.trajectory, Trajectory::Worsening);
    }

    #[test]
    fn test_relative_change_precision() {
        let delta = classify_delta(60, 40);
        assert!((delta.relative_percent_change - -33.33).abs() < 1e-9);
    }

    #[test]
    fn test_behavioral_only_override() {
        let overrides = ScenarioOverrides {
            biomarkers: BiomarkerPanel::default(),
            behavioral: Some(BehavioralProfile {
                exercise_days: Some(6),
                sleep_hours: Some(8.0),
                stress_level: Some(2),
                alcohol_frequency: Some(0.0),
            }),
        };
        let baseline_behavioral = BehavioralProfile {
            exercise_days: Some(0),
            sleep_hours: Some(5.0),
            stress_level: Some(9),
            alcohol_frequency: Some(15.0),
        };
        let (baseline, scenario, delta) = simulate(
            &elevated_panel(),
            Some(&baseline_behavioral),
            &overrides,
            &config(),
        )
        .unwrap();
        assert!(scenario.risk_score <= baseline.risk_score);
        assert_ne!(delta.trajectory, Trajectory::Worsening);
    }
}
