//! Risk-engine configuration: the full tunable surface.
//!
//! Every constant of the scoring pipeline lives here — clinically-defined
//! reference ranges, domain weights, synergy/severity/floor triggers,
//! logistic conversion parameters, temporal projection parameters, and
//! economic constants. Deployments can override any of it via YAML/JSON;
//! the defaults are the documented clinical calibration.

use serde::{Deserialize, Serialize};

/// Complete risk-engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub ranges: ReferenceRanges,

    #[serde(default)]
    pub domain_weights: DomainWeights,

    #[serde(default)]
    pub composite: CompositeConfig,

    #[serde(default)]
    pub projection: ProjectionConfig,

    #[serde(default)]
    pub economics: EconomicsConfig,
}

impl RiskConfig {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Sanity-check the tunable surface.
    pub fn validate(&self) -> bool {
        self.domain_weights.validate()
            && self.projection.samples >= 500
            && self.composite.threshold > 0.0
            && self.composite.threshold < 1.0
            && self.composite.steepness > 0.0
    }
}

// ── Reference Ranges ─────────────────────────────────────────────────────────

/// A clinically-defined reference range for one marker.
/// Values at or below `low` contribute 0 risk, at or above `high` contribute 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
}

impl ReferenceRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Per-marker reference ranges. Protective markers (HDL, vitamin D) use the
/// same range shape but are normalised inversely by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRanges {
    #[serde(default = "default_fasting_glucose")]
    pub fasting_glucose: ReferenceRange, // mg/dL
    #[serde(default = "default_triglycerides")]
    pub triglycerides: ReferenceRange, // mg/dL
    #[serde(default = "default_hdl")]
    pub hdl: ReferenceRange, // mg/dL, protective
    #[serde(default = "default_ldl")]
    pub ldl: ReferenceRange, // mg/dL
    #[serde(default = "default_hba1c")]
    pub hba1c: ReferenceRange, // %
    #[serde(default = "default_hs_crp")]
    pub hs_crp: ReferenceRange, // mg/L
    #[serde(default = "default_ast")]
    pub ast: ReferenceRange, // U/L
    #[serde(default = "default_alt")]
    pub alt: ReferenceRange, // U/L
    #[serde(default = "default_vitamin_d")]
    pub vitamin_d: ReferenceRange, // ng/mL, protective (deficit below 30)
    #[serde(default = "default_esr")]
    pub esr: ReferenceRange, // mm/hr
    #[serde(default = "default_tg_hdl_ratio")]
    pub tg_hdl_ratio: ReferenceRange, // dimensionless auxiliary signal
}

fn default_fasting_glucose() -> ReferenceRange { ReferenceRange::new(100.0, 180.0) }
fn default_triglycerides() -> ReferenceRange { ReferenceRange::new(150.0, 400.0) }
fn default_hdl() -> ReferenceRange { ReferenceRange::new(40.0, 70.0) }
fn default_ldl() -> ReferenceRange { ReferenceRange::new(100.0, 190.0) }
fn default_hba1c() -> ReferenceRange { ReferenceRange::new(5.7, 8.5) }
fn default_hs_crp() -> ReferenceRange { ReferenceRange::new(1.0, 10.0) }
fn default_ast() -> ReferenceRange { ReferenceRange::new(40.0, 250.0) }
fn default_alt() -> ReferenceRange { ReferenceRange::new(40.0, 350.0) }
fn default_vitamin_d() -> ReferenceRange { ReferenceRange::new(0.0, 30.0) }
fn default_esr() -> ReferenceRange { ReferenceRange::new(20.0, 70.0) }
fn default_tg_hdl_ratio() -> ReferenceRange { ReferenceRange::new(3.0, 10.0) }

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self {
            fasting_glucose: default_fasting_glucose(),
            triglycerides: default_triglycerides(),
            hdl: default_hdl(),
            ldl: default_ldl(),
            hba1c: default_hba1c(),
            hs_crp: default_hs_crp(),
            ast: default_ast(),
            alt: default_alt(),
            vitamin_d: default_vitamin_d(),
            esr: default_esr(),
            tg_hdl_ratio: default_tg_hdl_ratio(),
        }
    }
}

// ── Domain Weights ───────────────────────────────────────────────────────────

/// Composite-stage weight per physiological domain. Weights sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainWeights {
    #[serde(default = "default_cardiovascular_weight")]
    pub cardiovascular: f64,
    #[serde(default = "default_hepatic_weight")]
    pub hepatic: f64,
    #[serde(default = "default_metabolic_weight")]
    pub metabolic: f64,
    #[serde(default = "default_inflammatory_weight")]
    pub inflammatory: f64,
    #[serde(default = "default_nutritional_weight")]
    pub nutritional: f64,
    #[serde(default = "default_behavioral_weight")]
    pub behavioral: f64,
}

fn default_cardiovascular_weight() -> f64 { 0.28 }
fn default_hepatic_weight() -> f64 { 0.22 }
fn default_metabolic_weight() -> f64 { 0.15 }
fn default_inflammatory_weight() -> f64 { 0.12 }
fn default_nutritional_weight() -> f64 { 0.08 }
fn default_behavioral_weight() -> f64 { 0.15 }

impl Default for DomainWeights {
    fn default() -> Self {
        Self {
            cardiovascular: default_cardiovascular_weight(),
            hepatic: default_hepatic_weight(),
            metabolic: default_metabolic_weight(),
            inflammatory: default_inflammatory_weight(),
            nutritional: default_nutritional_weight(),
            behavioral: default_behavioral_weight(),
        }
    }
}

impl DomainWeights {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.cardiovascular,
            self.hepatic,
            self.metabolic,
            self.inflammatory,
            self.nutritional,
            self.behavioral,
        ]
    }

    /// Validate that all weights sum to ~1.0
    pub fn validate(&self) -> bool {
        (self.as_array().iter().sum::<f64>() - 1.0).abs() < 1e-6
    }

    /// Renormalise weights so they sum to 1.0
    pub fn normalise(&mut self) {
        let sum: f64 = self.as_array().iter().sum();
        if sum > 0.0 {
            self.cardiovascular /= sum;
            self.hepatic /= sum;
            self.metabolic /= sum;
            self.inflammatory /= sum;
            self.nutritional /= sum;
            self.behavioral /= sum;
        }
    }
}

// ── Composite Scoring ────────────────────────────────────────────────────────

/// Constants of the composite → probability conversion and its adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeConfig {
    /// Logistic threshold τ: composite value mapping to probability 0.5.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Logistic steepness k.
    #[serde(default = "default_steepness")]
    pub steepness: f64,
    /// Additive penalty per unresolved input field.
    #[serde(default = "default_missing_field_penalty")]
    pub missing_field_penalty: f64,
    #[serde(default)]
    pub synergy: SynergyConfig,
    #[serde(default)]
    pub severity: SeverityConfig,
    #[serde(default)]
    pub floor: OverrideFloorConfig,
}

fn default_threshold() -> f64 { 0.38 }
fn default_steepness() -> f64 { 7.0 }
fn default_missing_field_penalty() -> f64 { 0.02 }

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            steepness: default_steepness(),
            missing_field_penalty: default_missing_field_penalty(),
            synergy: SynergyConfig::default(),
            severity: SeverityConfig::default(),
            floor: OverrideFloorConfig::default(),
        }
    }
}

/// Synergy bonuses for co-elevated domain pairs. Each rule fires only when
/// both indices are known and above its thresholds; bonuses stack additively
/// onto a multiplier starting at 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynergyConfig {
    #[serde(default = "default_cardio_inflammatory_threshold")]
    pub cardio_inflammatory_threshold: f64,
    #[serde(default = "default_cardio_inflammatory_bonus")]
    pub cardio_inflammatory_bonus: f64,

    #[serde(default = "default_hepatic_threshold")]
    pub hepatic_threshold: f64,
    #[serde(default = "default_hepatic_metabolic_threshold")]
    pub hepatic_metabolic_threshold: f64,
    #[serde(default = "default_hepatic_metabolic_bonus")]
    pub hepatic_metabolic_bonus: f64,

    #[serde(default = "default_cardio_metabolic_threshold")]
    pub cardio_metabolic_threshold: f64,
    #[serde(default = "default_cardio_metabolic_bonus")]
    pub cardio_metabolic_bonus: f64,
}

fn default_cardio_inflammatory_threshold() -> f64 { 0.6 }
fn default_cardio_inflammatory_bonus() -> f64 { 0.15 }
fn default_hepatic_threshold() -> f64 { 0.7 }
fn default_hepatic_metabolic_threshold() -> f64 { 0.5 }
fn default_hepatic_metabolic_bonus() -> f64 { 0.15 }
fn default_cardio_metabolic_threshold() -> f64 { 0.6 }
fn default_cardio_metabolic_bonus() -> f64 { 0.10 }

impl Default for SynergyConfig {
    fn default() -> Self {
        Self {
            cardio_inflammatory_threshold: default_cardio_inflammatory_threshold(),
            cardio_inflammatory_bonus: default_cardio_inflammatory_bonus(),
            hepatic_threshold: default_hepatic_threshold(),
            hepatic_metabolic_threshold: default_hepatic_metabolic_threshold(),
            hepatic_metabolic_bonus: default_hepatic_metabolic_bonus(),
            cardio_metabolic_threshold: default_cardio_metabolic_threshold(),
            cardio_metabolic_bonus: default_cardio_metabolic_bonus(),
        }
    }
}

/// Severity escalation: additive terms triggered by single extreme raw
/// values, independent of the weighted composite, so one severely abnormal
/// marker cannot be diluted away by many normal ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityConfig {
    #[serde(default = "default_alt_extreme")]
    pub alt_extreme: f64, // U/L
    #[serde(default = "default_alt_extreme_bonus")]
    pub alt_extreme_bonus: f64,
    #[serde(default = "default_ldl_extreme")]
    pub ldl_extreme: f64, // mg/dL
    #[serde(default = "default_ldl_extreme_bonus")]
    pub ldl_extreme_bonus: f64,
    #[serde(default = "default_crp_extreme")]
    pub crp_extreme: f64, // mg/L
    #[serde(default = "default_crp_extreme_bonus")]
    pub crp_extreme_bonus: f64,
}

fn default_alt_extreme() -> f64 { 250.0 }
fn default_alt_extreme_bonus() -> f64 { 0.12 }
fn default_ldl_extreme() -> f64 { 180.0 }
fn default_ldl_extreme_bonus() -> f64 { 0.10 }
fn default_crp_extreme() -> f64 { 5.0 }
fn default_crp_extreme_bonus() -> f64 { 0.10 }

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            alt_extreme: default_alt_extreme(),
            alt_extreme_bonus: default_alt_extreme_bonus(),
            ldl_extreme: default_ldl_extreme(),
            ldl_extreme_bonus: default_ldl_extreme_bonus(),
            crp_extreme: default_crp_extreme(),
            crp_extreme_bonus: default_crp_extreme_bonus(),
        }
    }
}

/// Hard triggers forcing a minimum score regardless of the composite, so a
/// single dangerous marker is never masked by an otherwise-moderate panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideFloorConfig {
    #[serde(default = "default_alt_trigger")]
    pub alt_trigger: f64, // U/L, exclusive
    #[serde(default = "default_crp_trigger")]
    pub crp_trigger: f64, // mg/L, exclusive
    #[serde(default = "default_hba1c_trigger")]
    pub hba1c_trigger: f64, // %, inclusive
    #[serde(default = "default_floor_score")]
    pub floor_score: u8,
}

fn default_alt_trigger() -> f64 { 200.0 }
fn default_crp_trigger() -> f64 { 3.0 }
fn default_hba1c_trigger() -> f64 { 5.7 }
fn default_floor_score() -> u8 { 60 }

impl Default for OverrideFloorConfig {
    fn default() -> Self {
        Self {
            alt_trigger: default_alt_trigger(),
            crp_trigger: default_crp_trigger(),
            hba1c_trigger: default_hba1c_trigger(),
            floor_score: default_floor_score(),
        }
    }
}

// ── Temporal Projection ──────────────────────────────────────────────────────

/// Which projection strategy a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionStrategy {
    Analytic,
    MonteCarlo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_strategy")]
    pub strategy: ProjectionStrategy,

    /// Monte Carlo sample count (≥ 500).
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_base_volatility")]
    pub base_volatility: f64,
    #[serde(default = "default_volatility_per_elevated_domain")]
    pub volatility_per_elevated_domain: f64,
    /// A domain index above this counts as highly elevated.
    #[serde(default = "default_elevated_threshold")]
    pub elevated_threshold: f64,
    #[serde(default = "default_ten_year_mean_multiplier")]
    pub ten_year_mean_multiplier: f64,
    #[serde(default = "default_ten_year_volatility_multiplier")]
    pub ten_year_volatility_multiplier: f64,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when unset.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Analytic logistic curves per horizon.
    #[serde(default = "default_five_year_curve")]
    pub five_year_curve: LogisticCurve,
    #[serde(default = "default_ten_year_curve")]
    pub ten_year_curve: LogisticCurve,

    /// Sub-100 ceiling: projections never imply certainty.
    #[serde(default = "default_ceiling")]
    pub ceiling_percent: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogisticCurve {
    pub threshold: f64,
    pub steepness: f64,
}

fn default_strategy() -> ProjectionStrategy { ProjectionStrategy::Analytic }
fn default_samples() -> usize { 600 }
fn default_base_volatility() -> f64 { 0.10 }
fn default_volatility_per_elevated_domain() -> f64 { 0.05 }
fn default_elevated_threshold() -> f64 { 0.6 }
fn default_ten_year_mean_multiplier() -> f64 { 1.15 }
fn default_ten_year_volatility_multiplier() -> f64 { 1.4 }
fn default_five_year_curve() -> LogisticCurve { LogisticCurve { threshold: 0.45, steepness: 8.0 } }
fn default_ten_year_curve() -> LogisticCurve { LogisticCurve { threshold: 0.35, steepness: 10.0 } }
fn default_ceiling() -> f64 { 99.0 }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            samples: default_samples(),
            base_volatility: default_base_volatility(),
            volatility_per_elevated_domain: default_volatility_per_elevated_domain(),
            elevated_threshold: default_elevated_threshold(),
            ten_year_mean_multiplier: default_ten_year_mean_multiplier(),
            ten_year_volatility_multiplier: default_ten_year_volatility_multiplier(),
            seed: None,
            five_year_curve: default_five_year_curve(),
            ten_year_curve: default_ten_year_curve(),
            ceiling_percent: default_ceiling(),
        }
    }
}

// ── Economics ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsConfig {
    /// Annual cost per risk-score point, whole currency units.
    #[serde(default = "default_unit_cost_factor")]
    pub unit_cost_factor: f64,
    /// Fraction of the ten-year cost considered preventable.
    #[serde(default = "default_preventable_fraction")]
    pub preventable_fraction: f64,
}

fn default_unit_cost_factor() -> f64 { 120.0 }
fn default_preventable_fraction() -> f64 { 0.35 }

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            unit_cost_factor: default_unit_cost_factor(),
            preventable_fraction: default_preventable_fraction(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
