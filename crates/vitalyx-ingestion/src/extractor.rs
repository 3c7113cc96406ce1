//! Pattern-based marker extraction from report text.

use regex::Regex;
use vitalyx_common::entities::BiomarkerPanel;

/// A panel extracted from free text, with the matched fraction of expected
/// markers as a rough extraction confidence.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub panel: BiomarkerPanel,
    pub confidence: f64,
}

/// Compiled marker patterns. Case-insensitive, tolerant of `:` / `-`
/// separators; the first match per marker wins.
pub struct BiomarkerExtractor {
    fasting_glucose: Regex,
    triglycerides: Regex,
    hdl: Regex,
    ldl: Regex,
    hba1c: Regex,
    hs_crp: Regex,
    ast: Regex,
    alt: Regex,
    vitamin_d: Regex,
    esr: Regex,
}

fn marker_pattern(name: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{name}\s*[:\-]?\s*(\d+\.?\d*)")).expect("static pattern")
}

impl Default for BiomarkerExtractor {
    fn default() -> Self {
        Self {
            fasting_glucose: marker_pattern("glucose"),
            triglycerides: marker_pattern("triglycerides"),
            hdl: marker_pattern("hdl"),
            ldl: marker_pattern("ldl"),
            hba1c: marker_pattern("hba1c"),
            hs_crp: marker_pattern("crp"),
            ast: marker_pattern("ast"),
            alt: marker_pattern("alt"),
            vitamin_d: marker_pattern(r"vitamin\s*d"),
            esr: marker_pattern("esr"),
        }
    }
}

impl BiomarkerExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, pattern: &Regex, text: &str) -> Option<f64> {
        pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }

    /// Extract whatever markers the text carries. Absence is not an error.
    pub fn extract(&self, text: &str) -> ExtractionOutcome {
        let panel = BiomarkerPanel {
            fasting_glucose: self.find(&self.fasting_glucose, text),
            triglycerides: self.find(&self.triglycerides, text),
            hdl: self.find(&self.hdl, text),
            ldl: self.find(&self.ldl, text),
            hba1c: self.find(&self.hba1c, text),
            hs_crp: self.find(&self.hs_crp, text),
            ast: self.find(&self.ast, text),
            alt: self.find(&self.alt, text),
            vitamin_d: self.find(&self.vitamin_d, text),
            esr: self.find(&self.esr, text),
        };
        let confidence = panel.filled_count() as f64 / BiomarkerPanel::FIELD_COUNT as f64;
        let confidence = (confidence * 100.0).round() / 100.0;

        tracing::debug!(
            markers = panel.filled_count(),
            confidence,
            "biomarkers extracted"
        );
        ExtractionOutcome { panel, confidence }
    }
}
