//! Domain index computation: normalised marker contributions → one index
//! per physiological system.
//!
//! Missing-data policy (applied uniformly, see DESIGN.md): an unknown member
//! is excluded together with its weight and the average renormalises over
//! the remaining weights; a domain whose members are all unknown is itself
//! unknown, never a default.

use serde::{Deserialize, Serialize};
use vitalyx_common::entities::{BehavioralProfile, BiomarkerPanel};
use vitalyx_common::risk_config::{ReferenceRange, RiskConfig};

use crate::normalise::{normalise, normalise_inverse, round2};

// Member weights within each domain are part of the model definition, not
// deployment tuning, so they live here rather than in RiskConfig.
const CARDIO_LDL_WEIGHT: f64 = 0.30;
const CARDIO_TG_WEIGHT: f64 = 0.20;
const CARDIO_HDL_WEIGHT: f64 = 0.15;
const CARDIO_CRP_WEIGHT: f64 = 0.15;
const CARDIO_RATIO_WEIGHT: f64 = 0.20;

const HEPATIC_AST_WEIGHT: f64 = 0.60;
const HEPATIC_ALT_WEIGHT: f64 = 0.40;

const METABOLIC_GLUCOSE_WEIGHT: f64 = 0.50;
const METABOLIC_HBA1C_WEIGHT: f64 = 0.50;

const INFLAMMATORY_CRP_WEIGHT: f64 = 0.70;
const INFLAMMATORY_ESR_WEIGHT: f64 = 0.30;

const BEHAVIORAL_SLEEP_WEIGHT: f64 = 0.30;
const BEHAVIORAL_STRESS_WEIGHT: f64 = 0.30;
const BEHAVIORAL_EXERCISE_WEIGHT: f64 = 0.25;
const BEHAVIORAL_ALCOHOL_WEIGHT: f64 = 0.15;

// Behavioral normalisation ranges.
const SLEEP_RANGE: ReferenceRange = ReferenceRange::new(4.0, 7.0); // hours, protective
const STRESS_RANGE: ReferenceRange = ReferenceRange::new(4.0, 9.0); // ordinal
const EXERCISE_RANGE: ReferenceRange = ReferenceRange::new(0.0, 5.0); // days/week, protective
const ALCOHOL_RANGE: ReferenceRange = ReferenceRange::new(3.0, 14.0); // drinks/week

/// The six physiological domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Cardiovascular,
    Hepatic,
    Metabolic,
    Inflammatory,
    Nutritional,
    Behavioral,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::Cardiovascular,
        Domain::Hepatic,
        Domain::Metabolic,
        Domain::Inflammatory,
        Domain::Nutritional,
        Domain::Behavioral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Cardiovascular => "cardiovascular",
            Domain::Hepatic => "hepatic",
            Domain::Metabolic => "metabolic",
            Domain::Inflammatory => "inflammatory",
            Domain::Nutritional => "nutritional",
            Domain::Behavioral => "behavioral",
        }
    }
}

/// One index per domain, each in [0, 1] when defined. `None` means the
/// domain had no resolvable member at all ("unknown"), which serialises as
/// JSON null rather than a biased default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainIndices {
    pub cardiovascular: Option<f64>,
    pub hepatic: Option<f64>,
    pub metabolic: Option<f64>,
    pub inflammatory: Option<f64>,
    pub nutritional: Option<f64>,
    pub behavioral: Option<f64>,
}

impl DomainIndices {
    pub fn get(&self, domain: Domain) -> Option<f64> {
        match domain {
            Domain::Cardiovascular => self.cardiovascular,
            Domain::Hepatic => self.hepatic,
            Domain::Metabolic => self.metabolic,
            Domain::Inflammatory => self.inflammatory,
            Domain::Nutritional => self.nutritional,
            Domain::Behavioral => self.behavioral,
        }
    }

    pub fn as_array(&self) -> [Option<f64>; 6] {
        [
            self.cardiovascular,
            self.hepatic,
            self.metabolic,
            self.inflammatory,
            self.nutritional,
            self.behavioral,
        ]
    }

    pub fn known_count(&self) -> usize {
        self.as_array().iter().filter(|v| v.is_some()).count()
    }

    pub fn all_unknown(&self) -> bool {
        self.known_count() == 0
    }

    /// Count of domains strictly above an elevation threshold.
    pub fn elevated_count(&self, threshold: f64) -> usize {
        self.as_array()
            .iter()
            .filter(|v| matches!(v, Some(x) if *x > threshold))
            .count()
    }

    /// Copy with every defined index rounded to 2 decimals, the documented
    /// output precision. Scoring always uses the unrounded values.
    pub fn rounded(&self) -> DomainIndices {
        DomainIndices {
            cardiovascular: self.cardiovascular.map(round2),
            hepatic: self.hepatic.map(round2),
            metabolic: self.metabolic.map(round2),
            inflammatory: self.inflammatory.map(round2),
            nutritional: self.nutritional.map(round2),
            behavioral: self.behavioral.map(round2),
        }
    }
}

/// Weighted average over the known members, renormalising over the weights
/// that remain. All members unknown → `None`.
fn weighted_mean(members: &[(f64, Option<f64>)]) -> Option<f64> {
    let mut num = 0.0;
    let mut den = 0.0;
    for (weight, value) in members {
        if let Some(v) = value {
            num += weight * v;
            den += weight;
        }
    }
    if den > 0.0 {
        Some(num / den)
    } else {
        None
    }
}

/// Compute all six domain indices from a panel and optional behavioral inputs.
pub fn compute_domain_indices(
    panel: &BiomarkerPanel,
    behavioral: Option<&BehavioralProfile>,
    config: &RiskConfig,
) -> DomainIndices {
    let ranges = &config.ranges;

    let ldl_norm = normalise(panel.ldl, &ranges.ldl);
    let tg_norm = normalise(panel.triglycerides, &ranges.triglycerides);
    let hdl_inverse = normalise_inverse(panel.hdl, &ranges.hdl);
    let crp_norm = normalise(panel.hs_crp, &ranges.hs_crp);
    let glucose_norm = normalise(panel.fasting_glucose, &ranges.fasting_glucose);
    let hba1c_norm = normalise(panel.hba1c, &ranges.hba1c);
    let ast_norm = normalise(panel.ast, &ranges.ast);
    let alt_norm = normalise(panel.alt, &ranges.alt);
    let vitd_deficit = normalise_inverse(panel.vitamin_d, &ranges.vitamin_d);
    let esr_norm = normalise(panel.esr, &ranges.esr);

    // Auxiliary atherogenic signal, only defined when both components are
    // present (a ratio against an absent denominator is not a ratio).
    let ratio_signal = match (panel.triglycerides, panel.hdl) {
        (Some(tg), Some(hdl)) if hdl > 0.0 => normalise(Some(tg / hdl), &ranges.tg_hdl_ratio),
        _ => None,
    };

    let cardiovascular = weighted_mean(&[
        (CARDIO_LDL_WEIGHT, ldl_norm),
        (CARDIO_TG_WEIGHT, tg_norm),
        (CARDIO_HDL_WEIGHT, hdl_inverse),
        (CARDIO_CRP_WEIGHT, crp_norm),
        (CARDIO_RATIO_WEIGHT, ratio_signal),
    ]);

    let hepatic = weighted_mean(&[
        (HEPATIC_AST_WEIGHT, ast_norm),
        (HEPATIC_ALT_WEIGHT, alt_norm),
    ]);

    let metabolic = weighted_mean(&[
        (METABOLIC_GLUCOSE_WEIGHT, glucose_norm),
        (METABOLIC_HBA1C_WEIGHT, hba1c_norm),
    ]);

    let inflammatory = weighted_mean(&[
        (INFLAMMATORY_CRP_WEIGHT, crp_norm),
        (INFLAMMATORY_ESR_WEIGHT, esr_norm),
    ]);

    let nutritional = vitd_deficit;

    let behavioral = behavioral.and_then(|b| {
        let sleep_risk = normalise_inverse(b.sleep_hours, &SLEEP_RANGE);
        let stress_risk = normalise(b.stress_level.map(f64::from), &STRESS_RANGE);
        let exercise_risk = normalise_inverse(b.exercise_days.map(f64::from), &EXERCISE_RANGE);
        let alcohol_risk = normalise(b.alcohol_frequency, &ALCOHOL_RANGE);
        weighted_mean(&[
            (BEHAVIORAL_SLEEP_WEIGHT, sleep_risk),
            (BEHAVIORAL_STRESS_WEIGHT, stress_risk),
            (BEHAVIORAL_EXERCISE_WEIGHT, exercise_risk),
            (BEHAVIORAL_ALCOHOL_WEIGHT, alcohol_risk),
        ])
    });

    DomainIndices {
        cardiovascular,
        hepatic,
        metabolic,
        inflammatory,
        nutritional,
        behavioral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RiskConfig {
        RiskConfig::default()
    }

    #[test]
    fn test_weighted_mean_renormalises_over_known_members() {
        // Only one of two members known: the average is that member alone.
        let m = weighted_mean(&[(0.6, None), (0.4, Some(0.5))]);
        assert!((m.unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_mean_all_unknown_is_unknown() {
        assert_eq!(weighted_mean(&[(0.6, None), (0.4, None)]), None);
    }

    #[test]
    fn test_hepatic_weighting() {
        let panel = BiomarkerPanel {
            ast: Some(145.0), // norm 0.5 over 40–250
            alt: Some(350.0), // norm 1.0 over 40–350
            ..Default::default()
        };
        let idx = compute_domain_indices(&panel, None, &config());
        // 0.6·0.5 + 0.4·1.0 = 0.7
        assert!((idx.hepatic.unwrap() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_signal_requires_both_components() {
        let panel = BiomarkerPanel {
            triglycerides: Some(300.0),
            ..Default::default()
        };
        let idx = compute_domain_indices(&panel, None, &config());
        // TG alone: cardio index renormalises over the TG weight only.
        let tg_norm = (300.0 - 150.0) / 250.0;
        assert!((idx.cardiovascular.unwrap() - tg_norm).abs() < 1e-9);
    }

    #[test]
    fn test_cardiovascular_index_reference_panel() {
        // The documented mid-range-elevated lipid panel.
        let panel = BiomarkerPanel {
            ldl: Some(150.0),
            triglycerides: Some(180.0),
            hdl: Some(38.0),
            hs_crp: Some(1.2),
            ..Default::default()
        };
        let idx = compute_domain_indices(&panel, None, &config());
        let cardio = idx.cardiovascular.unwrap();
        assert!(cardio > 0.3 && cardio < 0.5, "expected 0.3–0.5, got {cardio}");
    }

    #[test]
    fn test_empty_panel_all_unknown() {
        let idx = compute_domain_indices(&BiomarkerPanel::default(), None, &config());
        assert!(idx.all_unknown());
    }

    #[test]
    fn test_indices_stay_in_unit_interval() {
        let panel = BiomarkerPanel {
            fasting_glucose: Some(900.0),
            triglycerides: Some(2000.0),
            hdl: Some(1.0),
            ldl: Some(500.0),
            hba1c: Some(15.0),
            hs_crp: Some(80.0),
            ast: Some(999.0),
            alt: Some(999.0),
            vitamin_d: Some(0.0),
            esr: Some(150.0),
        };
        let behavioral = BehavioralProfile {
            sleep_hours: Some(0.0),
            stress_level: Some(10),
            exercise_days: Some(0),
            alcohol_frequency: Some(40.0),
        };
        let idx = compute_domain_indices(&panel, Some(&behavioral), &config());
        for value in idx.as_array().into_iter().flatten() {
            assert!((0.0..=1.0).contains(&value));
        }
        assert_eq!(idx.known_count(), 6);
    }

    #[test]
    fn test_behavioral_domain_protective_directions() {
        let good = BehavioralProfile {
            sleep_hours: Some(8.0),
            stress_level: Some(2),
            exercise_days: Some(6),
            alcohol_frequency: Some(0.0),
        };
        let idx = compute_domain_indices(&BiomarkerPanel::default(), Some(&good), &config());
        assert!((idx.behavioral.unwrap() - 0.0).abs() < 1e-9);

        let poor = BehavioralProfile {
            sleep_hours: Some(4.0),
            stress_level: Some(10),
            exercise_days: Some(0),
            alcohol_frequency: Some(20.0),
        };
        let idx = compute_domain_indices(&BiomarkerPanel::default(), Some(&poor), &config());
        assert!((idx.behavioral.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_behavioral_absent_profile_is_unknown() {
        let idx = compute_domain_indices(&BiomarkerPanel::default(), None, &config());
        assert_eq!(idx.behavioral, None);
        let empty = BehavioralProfile::default();
        let idx = compute_domain_indices(&BiomarkerPanel::default(), Some(&empty), &config());
        assert_eq!(idx.behavioral, None);
    }

    #[test]
    fn test_elevated_count() {
        let idx = DomainIndices {
            cardiovascular: Some(0.8),
            hepatic: Some(0.61),
            metabolic: Some(0.6),
            inflammatory: None,
            nutritional: Some(0.1),
            behavioral: None,
        };
        assert_eq!(idx.elevated_count(0.6), 2);
    }

    #[test]
    fn test_unknown_serialises_as_null() {
        let idx = DomainIndices {
            cardiovascular: Some(0.39),
            ..Default::default()
        };
        let json = serde_json::to_value(&idx).unwrap();
        assert_eq!(json["cardiovascular"], 0.39);
        assert!(json["hepatic"].is_null());
    }
}
