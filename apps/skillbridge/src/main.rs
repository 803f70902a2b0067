mod config;
mod errors;
mod llm_client;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator, UnavailableGenerator};
use crate::matching::vocabulary::Vocabulary;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillBridge API v{}", env!("CARGO_PKG_VERSION"));

    // Load skill vocabulary (built-in tables unless SKILL_VOCABULARY_PATH is set)
    let vocabulary = match &config.vocabulary_path {
        Some(path) => {
            let vocabulary = Vocabulary::from_path(path)?;
            info!("Vocabulary loaded from {}", path.display());
            vocabulary
        }
        None => Vocabulary::builtin(),
    };
    info!(
        "Vocabulary ready: {} skills, {} roles",
        vocabulary.skills().len(),
        vocabulary.roles().len()
    );

    // Initialize text generator (fallback-only without an API key)
    let generator = build_generator(&config)?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        vocabulary: Arc::new(vocabulary),
        generator,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_generator(config: &Config) -> Result<Arc<dyn TextGenerator>> {
    match &config.anthropic_api_key {
        Some(api_key) => {
            let llm = LlmClient::new(
                api_key.clone(),
                config.llm_model.clone(),
                config.llm_max_tokens,
                config.llm_timeout,
            )?;
            info!(
                "LLM client initialized (model: {}, timeout: {:?})",
                llm.model(),
                config.llm_timeout
            );
            Ok(Arc::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; insights will use deterministic fallbacks");
            Ok(Arc::new(UnavailableGenerator))
        }
    }
}
