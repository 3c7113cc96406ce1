//! Value normalisation: raw marker measurements → unit risk contributions.

use vitalyx_common::risk_config::ReferenceRange;

/// Normalise a raw value against a reference range into a risk contribution
/// in [0, 1]. Absence stays absent: `None` is never conflated with zero risk.
///
/// A zero-width range degrades to a step function: 0 at or below the single
/// point, 1 above it.
pub fn normalise(value: Option<f64>, range: &ReferenceRange) -> Option<f64> {
    let v = value?;
    if (range.high - range.low).abs() < 1e-10 {
        // degenerate range
        return Some(if v <= range.low { 0.0 } else { 1.0 });
    }
    Some(((v - range.low) / (range.high - range.low)).clamp(0.0, 1.0))
}

/// Inverse normalisation for protective markers (HDL, vitamin D, sleep,
/// exercise): higher raw value → lower risk contribution.
pub fn normalise_inverse(value: Option<f64>, range: &ReferenceRange) -> Option<f64> {
    normalise(value, range).map(|n| 1.0 - n)
}

/// Standard logistic curve.
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Round to two decimals, the documented precision of index values.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to one decimal, the documented precision of projected percentages.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
