//! Rule-based textual collaborators: clinical summary, recommendations,
//! intervention plan, trajectory note.
//!
//! Deliberately simple threshold logic over raw values and domain indices —
//! the narrative layer handles nuance; these always succeed.

use serde::Serialize;
use vitalyx_common::entities::BiomarkerPanel;
use vitalyx_engine::{DomainIndices, RiskLevel};

/// Flag-based prose summary of the raw panel.
pub fn clinical_summary(panel: &BiomarkerPanel) -> String {
    if panel.is_empty() {
        return "No clinically relevant biomarkers detected in report.".to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    let mut cardio_flags: Vec<&str> = Vec::new();
    if matches!(panel.ldl, Some(v) if v >= 130.0) {
        cardio_flags.push("high LDL cholesterol");
    }
    if matches!(panel.triglycerides, Some(v) if v >= 150.0) {
        cardio_flags.push("elevated triglycerides");
    }
    if matches!(panel.hdl, Some(v) if v < 40.0) {
        cardio_flags.push("low HDL cholesterol");
    }
    if matches!(panel.hs_crp, Some(v) if v > 3.0) {
        cardio_flags.push("high inflammatory marker (hs-CRP)");
    }
    if !cardio_flags.is_empty() {
        parts.push(format!(
            "Cardiovascular risk indicators detected: {}.",
            cardio_flags.join(", ")
        ));
    }

    if matches!(panel.hba1c, Some(v) if v >= 5.7) {
        parts.push("HbA1c suggests prediabetic metabolic state.".to_string());
    }
    if matches!(panel.fasting_glucose, Some(v) if v >= 100.0) {
        parts.push("Elevated fasting glucose detected.".to_string());
    }

    let mut liver_flags: Vec<&str> = Vec::new();
    if matches!(panel.ast, Some(v) if v > 40.0) {
        liver_flags.push("elevated AST");
    }
    if matches!(panel.alt, Some(v) if v > 40.0) {
        liver_flags.push("elevated ALT");
    }
    if !liver_flags.is_empty() {
        parts.push(format!(
            "Liver stress markers present: {}.",
            liver_flags.join(", ")
        ));
    }

    if matches!(panel.esr, Some(v) if v > 20.0) {
        parts.push("Elevated erythrocyte sedimentation rate noted.".to_string());
    }
    if matches!(panel.vitamin_d, Some(v) if v < 20.0) {
        parts.push("Vitamin D deficiency detected.".to_string());
    }

    if parts.is_empty() {
        "No major clinical risk indicators detected. Continue preventive monitoring.".to_string()
    } else {
        parts.join(" ")
    }
}

/// Level-tiered action list.
pub fn recommendations(level: RiskLevel) -> Vec<&'static str> {
    match level {
        RiskLevel::Critical => vec![
            "Urgent physician consultation required.",
            "Comprehensive cardiovascular evaluation advised.",
            "Immediate liver function assessment recommended.",
            "Strict metabolic risk management required.",
        ],
        RiskLevel::High => vec![
            "Schedule physician consultation soon.",
            "Adopt structured diet and exercise program.",
            "Monitor lipid and glucose levels quarterly.",
        ],
        RiskLevel::Moderate => vec![
            "Lifestyle modification recommended.",
            "Increase cardiovascular exercise.",
            "Annual metabolic screening advised.",
        ],
        RiskLevel::Low => vec![
            "Maintain healthy lifestyle.",
            "Annual health screening advised.",
        ],
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InterventionDomain {
    pub domain: &'static str,
    pub actions: Vec<&'static str>,
}

/// Domain-targeted intervention plan driven by elevated indices.
pub fn intervention_plan(indices: &DomainIndices) -> Vec<InterventionDomain> {
    let mut plan = Vec::new();

    if matches!(indices.hepatic, Some(v) if v > 0.6) {
        plan.push(InterventionDomain {
            domain: "Hepatic",
            actions: vec![
                "Eliminate alcohol intake",
                "Reduce refined carbohydrates",
                "Increase omega-3 intake",
                "Repeat liver panel in 6-8 weeks",
            ],
        });
    }

    if matches!(indices.cardiovascular, Some(v) if v > 0.5) {
        plan.push(InterventionDomain {
            domain: "Cardiovascular",
            actions: vec![
                "Reduce saturated fat",
                "Increase fiber intake",
                "150 minutes/week exercise",
                "Repeat lipid panel in 3 months",
            ],
        });
    }

    plan
}

/// One-line trajectory framing keyed to the score bands.
pub fn trajectory_note(risk_score: u8) -> &'static str {
    if risk_score >= 60 {
        "Escalating systemic risk trajectory if unmanaged."
    } else {
        "Risk remains modifiable with early structured intervention."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_panel_summary() {
        assert_eq!(
            clinical_summary(&BiomarkerPanel::default()),
            "No clinically relevant biomarkers detected in report."
        );
    }

    #[test]
    fn test_normal_panel_has_no_flags() {
        let panel = BiomarkerPanel {
            ldl: Some(100.0),
            hdl: Some(60.0),
            ast: Some(25.0),
            ..Default::default()
        };
        assert!(clinical_summary(&panel).starts_with("No major clinical risk indicators"));
    }

    #[test]
    fn test_flags_are_aggregated_per_system() {
        let panel = BiomarkerPanel {
            ldl: Some(160.0),
            hdl: Some(35.0),
            ast: Some(90.0),
            alt: Some(120.0),
            vitamin_d: Some(12.0),
            ..Default::default()
        };
        let summary = clinical_summary(&panel);
        assert!(summary.contains("high LDL cholesterol"));
        assert!(summary.contains("low HDL cholesterol"));
        assert!(summary.contains("elevated AST"));
        assert!(summary.contains("elevated ALT"));
        assert!(summary.contains("Vitamin D deficiency"));
    }

    #[test]
    fn test_recommendations_scale_with_level() {
        assert!(recommendations(RiskLevel::Critical).len() > recommendations(RiskLevel::Low).len());
        assert!(recommendations(RiskLevel::Critical)[0].contains("Urgent"));
    }

    #[test]
    fn test_intervention_plan_targets_elevated_domains() {
        let indices = DomainIndices {
            hepatic: Some(0.75),
            cardiovascular: Some(0.2),
            ..Default::default()
        };
        let plan = intervention_plan(&indices);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].domain, "Hepatic");
    }

    #[test]
    fn test_unknown_indices_produce_no_plan() {
        assert!(intervention_plan(&DomainIndices::default()).is_empty());
    }

    #[test]
    fn test_trajectory_note_bands() {
        assert!(trajectory_note(75).starts_with("Escalating"));
        assert!(trajectory_note(59).starts_with("Risk remains modifiable"));
    }
}
