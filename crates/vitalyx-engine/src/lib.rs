//! vitalyx-engine — Deterministic health-risk scoring and scenario
//! simulation.
//!
//! Pipeline, leaves first: value normalisation → domain indices → composite
//! scoring (synergy, severity, missing-data conservatism, override floor) →
//! logistic conversion, with temporal projection, uncertainty and economic
//! estimation downstream. All computation is synchronous, CPU-bound and
//! side-effect-free; the only shared state is the per-session baseline
//! store in [`session`].

pub mod assessment;
pub mod domains;
pub mod economics;
pub mod normalise;
pub mod projection;
pub mod scenario;
pub mod scorer;
pub mod session;
pub mod uncertainty;

pub use assessment::{RiskAssessment, RiskEngine};
pub use domains::{Domain, DomainIndices};
pub use scenario::{ImpactMagnitude, ScenarioDelta, ScenarioOverrides, Trajectory};
pub use scorer::RiskLevel;
pub use session::{BaselineRecord, ScoreRecord, SessionStore};
