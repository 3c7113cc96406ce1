//! Vitalyx Web Server
//!
//! Run with: cargo run -p vitalyx-web

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use vitalyx_common::risk_config::RiskConfig;
use vitalyx_engine::RiskEngine;
use vitalyx_llm::backend::{OllamaBackend, OpenAiCompatibleBackend};
use vitalyx_llm::NarrativeGenerator;
use vitalyx_web::state::AppState;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai";
const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Vitalyx Web Server...");

    // Engine configuration: optional YAML override, documented defaults otherwise.
    let config = match std::env::var("VITALYX_CONFIG") {
        Ok(path) => {
            info!(path = %path, "loading risk configuration");
            RiskConfig::from_yaml(&path)?
        }
        Err(_) => RiskConfig::default(),
    };
    if !config.validate() {
        anyhow::bail!("invalid risk configuration");
    }

    let narrative = build_narrative_generator();
    let state = AppState::new(RiskEngine::new(config), narrative);
    let app = vitalyx_web::router::build_router(state);

    let port: u16 = std::env::var("VITALYX_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Narrative backend selection: Groq when an API key is present, a local
/// Ollama instance when configured, otherwise the fixed-fallback generator.
fn build_narrative_generator() -> NarrativeGenerator {
    if let Ok(key) = std::env::var("GROQ_API_KEY") {
        let model =
            std::env::var("VITALYX_LLM_MODEL").unwrap_or_else(|_| GROQ_DEFAULT_MODEL.to_string());
        info!(model = %model, "narrative backend: groq");
        return NarrativeGenerator::new(Arc::new(OpenAiCompatibleBackend::new(
            GROQ_BASE_URL,
            model,
            Some(key),
        )));
    }
    if let Ok(base_url) = std::env::var("OLLAMA_BASE_URL") {
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3:8b".to_string());
        info!(model = %model, url = %base_url, "narrative backend: ollama");
        return NarrativeGenerator::new(Arc::new(OllamaBackend::new(base_url, model)));
    }
    info!("narrative backend: disabled, deterministic output only");
    NarrativeGenerator::disabled()
}
