//! Temporal projection: 5-year and 10-year event-probability estimates.
//!
//! Two interchangeable strategies, selected by `ProjectionConfig::strategy`:
//! analytic (shifted/steepened logistic curves over the composite) and
//! stochastic (Monte Carlo resampling around the score with a volatility
//! driven by how many domains are highly elevated). Neither reports 100%:
//! projections carry a sub-100 ceiling so the output never implies certainty.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use vitalyx_common::risk_config::{LogisticCurve, ProjectionConfig, ProjectionStrategy};

use crate::domains::DomainIndices;
use crate::normalise::{logistic, round1};

/// One projection horizon. Analytic bands are degenerate
/// (low = high = point estimate); Monte Carlo bands carry the 10th and 90th
/// percentile of the resampled distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBand {
    pub risk_percent: f64,
    pub low_percent: f64,
    pub high_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventProjection {
    #[serde(rename = "5_year")]
    pub five_year: ProjectionBand,
    #[serde(rename = "10_year")]
    pub ten_year: ProjectionBand,
}

/// Build the projector RNG. A configured seed makes runs reproducible;
/// production deployments normally leave it unset.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Volatility widens with each highly elevated domain.
pub fn volatility(indices: &DomainIndices, config: &ProjectionConfig) -> f64 {
    config.base_volatility
        + config.volatility_per_elevated_domain
            * indices.elevated_count(config.elevated_threshold) as f64
}

fn analytic_horizon(composite: f64, curve: &LogisticCurve, ceiling: f64) -> ProjectionBand {
    let percent =
        round1((logistic((composite - curve.threshold) * curve.steepness) * 100.0).min(ceiling));
    ProjectionBand {
        risk_percent: percent,
        low_percent: percent,
        high_percent: percent,
    }
}

/// Analytic strategy: the composite pushed through per-horizon curves. The
/// 10-year curve uses a lower threshold and higher steepness, reflecting
/// compounding exposure over time.
pub fn project_analytic(composite: f64, config: &ProjectionConfig) -> EventProjection {
    EventProjection {
        five_year: analytic_horizon(composite, &config.five_year_curve, config.ceiling_percent),
        ten_year: analytic_horizon(composite, &config.ten_year_curve, config.ceiling_percent),
    }
}

/// Resample one horizon: `samples` draws of
/// `score × mean_multiplier × (1 + Uniform(−vol, vol))`, reported as the
/// mean with the 10th and 90th percentile. `vol = 0` degenerates to
/// mean = low = high = score × mean_multiplier.
pub fn sample_band(
    score: f64,
    mean_multiplier: f64,
    vol: f64,
    samples: usize,
    ceiling: f64,
    rng: &mut impl Rng,
) -> ProjectionBand {
    let center = score * mean_multiplier;
    let mut draws: Vec<f64> = (0..samples.max(1))
        .map(|_| {
            let noise = if vol > 0.0 { rng.gen_range(-vol..=vol) } else { 0.0 };
            (center * (1.0 + noise)).clamp(0.0, ceiling)
        })
        .collect();
    draws.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = draws.iter().sum::<f64>() / draws.len() as f64;
    let percentile = |q: f64| draws[((draws.len() - 1) as f64 * q).round() as usize];

    ProjectionBand {
        risk_percent: round1(mean),
        low_percent: round1(percentile(0.10)),
        high_percent: round1(percentile(0.90)),
    }
}

/// Stochastic strategy. The 10-year horizon uses a higher mean multiplier
/// and wider volatility than the 5-year horizon: uncertainty grows with the
/// projection length.
pub fn project_monte_carlo(
    score: u8,
    indices: &DomainIndices,
    config: &ProjectionConfig,
    rng: &mut impl Rng,
) -> EventProjection {
    let vol = volatility(indices, config);
    let five_year = sample_band(
        score as f64,
        1.0,
        vol,
        config.samples,
        config.ceiling_percent,
        rng,
    );
    let ten_year = sample_band(
        score as f64,
        config.ten_year_mean_multiplier,
        vol * config.ten_year_volatility_multiplier,
        config.samples,
        config.ceiling_percent,
        rng,
    );
    EventProjection {
        five_year,
        ten_year,
    }
}

/// Dispatch on the deployment's configured strategy.
pub fn project(
    composite: f64,
    score: u8,
    indices: &DomainIndices,
    config: &ProjectionConfig,
) -> EventProjection {
    match config.strategy {
        ProjectionStrategy::Analytic => project_analytic(composite, config),
        ProjectionStrategy::MonteCarlo => {
            let mut rng = rng_from_seed(config.seed);
            project_monte_carlo(score, indices, config, &mut rng)
        }
    }
}
