//! Economic impact: a pure function of the risk score.

use serde::{Deserialize, Serialize};
use vitalyx_common::risk_config::EconomicsConfig;

/// Projected costs in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicImpact {
    pub annual_cost: u64,
    pub ten_year_cost: u64,
    pub preventable_cost: u64,
}

pub fn estimate(risk_score: u8, config: &EconomicsConfig) -> EconomicImpact {
    let annual = (risk_score as f64 * config.unit_cost_factor).round();
    let ten_year = annual * 10.0;
    let preventable = (ten_year * config.preventable_fraction).round();
    EconomicImpact {
        annual_cost: annual as u64,
        ten_year_cost: ten_year as u64,
        preventable_cost: preventable as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let impact = estimate(50, &EconomicsConfig::default());
        assert_eq!(impact.annual_cost, 6_000);
        assert_eq!(impact.ten_year_cost, 60_000);
        assert_eq!(impact.preventable_cost, 21_000);
    }

    #[test]
    fn test_zero_score_costs_nothing() {
        let impact = estimate(0, &EconomicsConfig::default());
        assert_eq!(impact.annual_cost, 0);
        assert_eq!(impact.preventable_cost, 0);
    }
}
