//! Shared application state for the web server.

use std::sync::Arc;

use vitalyx_engine::{RiskEngine, SessionStore};
use vitalyx_ingestion::BiomarkerExtractor;
use vitalyx_llm::NarrativeGenerator;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub engine: RiskEngine,
    pub sessions: SessionStore,
    pub narrative: NarrativeGenerator,
    pub extractor: BiomarkerExtractor,
}

impl AppState {
    pub fn new(engine: RiskEngine, narrative: NarrativeGenerator) -> Self {
        Self {
            engine,
            sessions: SessionStore::new(),
            narrative,
            extractor: BiomarkerExtractor::new(),
        }
    }
}

pub type SharedState = Arc<AppState>;
