//! Uncertainty quantification from input completeness.

use serde::{Deserialize, Serialize};

use crate::normalise::round2;

/// How much of the expected input universe was available, and how much the
/// model output should be trusted as a consequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyEstimate {
    pub data_completeness: f64,
    pub model_confidence: f64,
}

/// completeness = filled / expected; confidence = 0.5 + completeness · 0.45.
/// The 0.5 floor reflects residual model uncertainty even with complete data.
pub fn estimate(filled_fields: usize, expected_fields: usize) -> UncertaintyEstimate {
    let completeness = if expected_fields == 0 {
        0.0
    } else {
        filled_fields as f64 / expected_fields as f64
    };
    UncertaintyEstimate {
        data_completeness: round2(completeness),
        model_confidence: round2(0.5 + completeness * 0.45),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_data_caps_below_one() {
        let u = estimate(14, 14);
        assert!((u.data_completeness - 1.0).abs() < 1e-12);
        assert!((u.model_confidence - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_no_data_keeps_confidence_floor() {
        let u = estimate(0, 14);
        assert!((u.data_completeness - 0.0).abs() < 1e-12);
        assert!((u.model_confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_partial_data_rounds_to_two_decimals() {
        let u = estimate(8, 14);
        assert!((u.data_completeness - 0.57).abs() < 1e-12);
        assert!((u.model_confidence - 0.76).abs() < 1e-12);
    }
}
