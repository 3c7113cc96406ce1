//! Boundary entities shared by ingestion, the risk engine, and the web layer.
//!
//! Every field is optional: panels arrive from document extraction where any
//! marker may be missing, and absence must survive deserialization rather
//! than collapse to a default value.

use serde::{Deserialize, Serialize};

/// A panel of clinical biomarker measurements.
/// Units are fixed per marker and documented on each field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerPanel {
    #[serde(default)]
    pub fasting_glucose: Option<f64>, // mg/dL
    #[serde(default)]
    pub triglycerides: Option<f64>,   // mg/dL
    #[serde(default)]
    pub hdl: Option<f64>,             // mg/dL
    #[serde(default)]
    pub ldl: Option<f64>,             // mg/dL
    #[serde(default)]
    pub hba1c: Option<f64>,           // %
    #[serde(default)]
    pub hs_crp: Option<f64>,          // mg/L
    #[serde(default)]
    pub ast: Option<f64>,             // U/L
    #[serde(default)]
    pub alt: Option<f64>,             // U/L
    #[serde(default)]
    pub vitamin_d: Option<f64>,       // ng/mL
    #[serde(default)]
    pub esr: Option<f64>,             // mm/hr
}

impl BiomarkerPanel {
    /// Number of markers the panel is expected to carry.
    pub const FIELD_COUNT: usize = 10;

    fn fields(&self) -> [Option<f64>; Self::FIELD_COUNT] {
        [
            self.fasting_glucose,
            self.triglycerides,
            self.hdl,
            self.ldl,
            self.hba1c,
            self.hs_crp,
            self.ast,
            self.alt,
            self.vitamin_d,
            self.esr,
        ]
    }

    pub fn filled_count(&self) -> usize {
        self.fields().iter().filter(|f| f.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Sparse merge: `Some` override fields replace the baseline value,
    /// `None` fields inherit it verbatim. Never a full replace.
    pub fn merge(&self, overrides: &BiomarkerPanel) -> BiomarkerPanel {
        BiomarkerPanel {
            fasting_glucose: overrides.fasting_glucose.or(self.fasting_glucose),
            triglycerides: overrides.triglycerides.or(self.triglycerides),
            hdl: overrides.hdl.or(self.hdl),
            ldl: overrides.ldl.or(self.ldl),
            hba1c: overrides.hba1c.or(self.hba1c),
            hs_crp: overrides.hs_crp.or(self.hs_crp),
            ast: overrides.ast.or(self.ast),
            alt: overrides.alt.or(self.alt),
            vitamin_d: overrides.vitamin_d.or(self.vitamin_d),
            esr: overrides.esr.or(self.esr),
        }
    }
}

/// Demographic context. Advisory: consumed by the narrative generator and
/// downstream collaborators, not by the composite formula.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub systolic_bp: Option<f64>, // mmHg
    #[serde(default)]
    pub smoker: Option<bool>,
}

/// Behavioral inputs feeding the dedicated behavioral domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralProfile {
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    /// Ordinal 1–10 self-reported stress.
    #[serde(default)]
    pub stress_level: Option<u8>,
    /// Days per week with meaningful exercise, 0–7.
    #[serde(default)]
    pub exercise_days: Option<u8>,
    /// Alcoholic drinks per week.
    #[serde(default)]
    pub alcohol_frequency: Option<f64>,
}

impl BehavioralProfile {
    pub const FIELD_COUNT: usize = 4;

    pub fn filled_count(&self) -> usize {
        [
            self.sleep_hours.is_some(),
            self.stress_level.is_some(),
            self.exercise_days.is_some(),
            self.alcohol_frequency.is_some(),
        ]
        .iter()
        .filter(|f| **f)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Sparse merge, same contract as [`BiomarkerPanel::merge`].
    pub fn merge(&self, overrides: &BehavioralProfile) -> BehavioralProfile {
        BehavioralProfile {
            sleep_hours: overrides.sleep_hours.or(self.sleep_hours),
            stress_level: overrides.stress_level.or(self.stress_level),
            exercise_days: overrides.exercise_days.or(self.exercise_days),
            alcohol_frequency: overrides.alcohol_frequency.or(self.alcohol_frequency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_accepts_any_subset() {
        let panel: BiomarkerPanel = serde_json::from_str(r#"{"ldl": 150.0}"#).unwrap();
        assert_eq!(panel.ldl, Some(150.0));
        assert_eq!(panel.hdl, None);
        assert_eq!(panel.filled_count(), 1);
    }

    #[test]
    fn test_empty_panel() {
        let panel: BiomarkerPanel = serde_json::from_str("{}").unwrap();
        assert!(panel.is_empty());
    }

    #[test]
    fn test_sparse_merge_inherits_baseline() {
        let baseline = BiomarkerPanel {
            ldl: Some(150.0),
            hdl: Some(38.0),
            alt: Some(30.0),
            ..Default::default()
        };
        let overrides = BiomarkerPanel {
            ldl: Some(100.0),
            ..Default::default()
        };
        let merged = baseline.merge(&overrides);
        assert_eq!(merged.ldl, Some(100.0)); // replaced
        assert_eq!(merged.hdl, Some(38.0)); // inherited
        assert_eq!(merged.alt, Some(30.0)); // inherited
    }

    #[test]
    fn test_merge_with_empty_overrides_is_identity() {
        let baseline = BiomarkerPanel {
            ldl: Some(150.0),
            hba1c: Some(5.5),
            ..Default::default()
        };
        assert_eq!(baseline.merge(&BiomarkerPanel::default()), baseline);
    }

    #[test]
    fn test_behavioral_merge() {
        let baseline = BehavioralProfile {
            sleep_hours: Some(5.0),
            exercise_days: Some(1),
            ..Default::default()
        };
        let overrides = BehavioralProfile {
            exercise_days: Some(5),
            ..Default::default()
        };
        let merged = baseline.merge(&overrides);
        assert_eq!(merged.sleep_hours, Some(5.0));
        assert_eq!(merged.exercise_days, Some(5));
    }
}
