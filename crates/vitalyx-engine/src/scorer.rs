//! Composite risk score computation.
//!
//! Pipeline: weighted domain composition → synergy multiplier → severity
//! escalation → missing-data conservatism → clamp → logistic conversion →
//! 4-tier level, with a hard override floor for dangerous single markers.

use serde::{Deserialize, Serialize};
use vitalyx_common::entities::{BehavioralProfile, BiomarkerPanel};
use vitalyx_common::error::{Result, VitalyxError};
use vitalyx_common::risk_config::RiskConfig;

use crate::domains::{compute_domain_indices, DomainIndices};
use crate::normalise::logistic;

/// Categorical risk level. Band thresholds partition [0, 100] with no gaps
/// and no overlaps: <30, <60, <80, else Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Critical Risk")]
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> RiskLevel {
        match score {
            0..=29 => RiskLevel::Low,
            30..=59 => RiskLevel::Moderate,
            60..=79 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Critical => "Critical Risk",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intermediate composite terms, kept for auditability and the narrative
/// layer; `composite` is the final clamped [0, 1] value fed to the logistic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeBreakdown {
    pub base: f64,
    pub synergy_multiplier: f64,
    pub interaction_flags: Vec<String>,
    pub severity_bonus: f64,
    pub missing_penalty: f64,
    pub composite: f64,
}

/// Full scoring result for one panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPanel {
    pub indices: DomainIndices,
    pub breakdown: CompositeBreakdown,
    pub probability: f64,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    /// True when the override floor raised the score.
    pub floored: bool,
}

/// Unresolved fields over the expected input universe: the 10 panel markers
/// plus the 4 behavioral fields. Demographics are advisory and not counted.
pub fn missing_field_count(panel: &BiomarkerPanel, behavioral: Option<&BehavioralProfile>) -> usize {
    let behavioral_filled = behavioral.map(|b| b.filled_count()).unwrap_or(0);
    (BiomarkerPanel::FIELD_COUNT - panel.filled_count())
        + (BehavioralProfile::FIELD_COUNT - behavioral_filled)
}

pub fn filled_field_count(panel: &BiomarkerPanel, behavioral: Option<&BehavioralProfile>) -> usize {
    expected_field_count() - missing_field_count(panel, behavioral)
}

pub fn expected_field_count() -> usize {
    BiomarkerPanel::FIELD_COUNT + BehavioralProfile::FIELD_COUNT
}

/// Compose domain indices into the clamped [0, 1] composite value.
///
/// Unknown domains drop out of both numerator and denominator of the base
/// average; conservatism under missing data comes from the explicit
/// per-field penalty, not from the average itself.
pub fn compute_composite(
    indices: &DomainIndices,
    panel: &BiomarkerPanel,
    behavioral: Option<&BehavioralProfile>,
    config: &RiskConfig,
) -> Result<CompositeBreakdown> {
    if indices.all_unknown() {
        return Err(VitalyxError::InsufficientData);
    }

    let weights = config.domain_weights.as_array();
    let mut num = 0.0;
    let mut den = 0.0;
    for (weight, index) in weights.iter().zip(indices.as_array()) {
        if let Some(value) = index {
            num += weight * value;
            den += weight;
        }
    }
    debug_assert!(den > 0.0);
    let base = num / den;

    // Synergy: concurrent elevation in interacting systems compounds risk
    // beyond the independent contributions. Rules fire only on known pairs.
    let syn = &config.composite.synergy;
    let mut synergy = 0.0;
    let mut interaction_flags = Vec::new();
    if let (Some(cardio), Some(infl)) = (indices.cardiovascular, indices.inflammatory) {
        if cardio > syn.cardio_inflammatory_threshold && infl > syn.cardio_inflammatory_threshold {
            synergy += syn.cardio_inflammatory_bonus;
            interaction_flags.push("cardio_inflammatory".to_string());
        }
    }
    if let (Some(hepatic), Some(metabolic)) = (indices.hepatic, indices.metabolic) {
        if hepatic > syn.hepatic_threshold && metabolic > syn.hepatic_metabolic_threshold {
            synergy += syn.hepatic_metabolic_bonus;
            interaction_flags.push("hepatic_metabolic".to_string());
        }
    }
    if let (Some(cardio), Some(metabolic)) = (indices.cardiovascular, indices.metabolic) {
        if cardio > syn.cardio_metabolic_threshold && metabolic > syn.cardio_metabolic_threshold {
            synergy += syn.cardio_metabolic_bonus;
            interaction_flags.push("cardio_metabolic".to_string());
        }
    }
    let synergy_multiplier = 1.0 + synergy;

    // Severity escalation on extreme raw values, independent of the average.
    let sev = &config.composite.severity;
    let mut severity_bonus = 0.0;
    if matches!(panel.alt, Some(alt) if alt > sev.alt_extreme) {
        severity_bonus += sev.alt_extreme_bonus;
    }
    if matches!(panel.ldl, Some(ldl) if ldl > sev.ldl_extreme) {
        severity_bonus += sev.ldl_extreme_bonus;
    }
    if matches!(panel.hs_crp, Some(crp) if crp > sev.crp_extreme) {
        severity_bonus += sev.crp_extreme_bonus;
    }

    let missing_penalty =
        config.composite.missing_field_penalty * missing_field_count(panel, behavioral) as f64;

    let composite = (base * synergy_multiplier + severity_bonus + missing_penalty).clamp(0.0, 1.0);

    Ok(CompositeBreakdown {
        base,
        synergy_multiplier,
        interaction_flags,
        severity_bonus,
        missing_penalty,
        composite,
    })
}

/// Map the composite through the logistic curve to a 0–100 integer score.
pub fn convert_score(composite: f64, config: &RiskConfig) -> (u8, f64) {
    let probability = logistic((composite - config.composite.threshold) * config.composite.steepness);
    let score = (probability * 100.0).round() as u8;
    (score, probability)
}

/// Hard safety clamp: specific dangerous single-marker values force a
/// minimum score so they are never masked by an otherwise-moderate composite.
pub fn apply_override_floor(score: u8, panel: &BiomarkerPanel, config: &RiskConfig) -> (u8, bool) {
    let floor = &config.composite.floor;
    let triggered = matches!(panel.alt, Some(alt) if alt > floor.alt_trigger)
        || matches!(panel.hs_crp, Some(crp) if crp > floor.crp_trigger)
        || matches!(panel.hba1c, Some(a1c) if a1c >= floor.hba1c_trigger);
    if triggered && score < floor.floor_score {
        (floor.floor_score, true)
    } else {
        (score, false)
    }
}

/// Score one panel end to end. This is the pure unit the scenario simulator
/// invokes twice; it never mutates its inputs.
pub fn score_panel(
    panel: &BiomarkerPanel,
    behavioral: Option<&BehavioralProfile>,
    config: &RiskConfig,
) -> Result<ScoredPanel> {
    let indices = compute_domain_indices(panel, behavioral, config);
    let breakdown = compute_composite(&indices, panel, behavioral, config)?;
    let (raw_score, probability) = convert_score(breakdown.composite, config);
    let (risk_score, floored) = apply_override_floor(raw_score, panel, config);
    let risk_level = RiskLevel::from_score(risk_score);

    tracing::debug!(
        composite = breakdown.composite,
        score = risk_score,
        level = %risk_level,
        floored,
        "panel scored"
    );

    Ok(ScoredPanel {
        indices,
        breakdown,
        probability,
        risk_score,
        risk_level,
        floored,
    })
}
