use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::matching::vocabulary::Vocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Skill vocabulary, domain keywords and role catalog, built once at startup.
    pub vocabulary: Arc<Vocabulary>,
    /// Pluggable text generator. `LlmClient` when an API key is set, otherwise
    /// `UnavailableGenerator` so every insight takes the fallback path.
    pub generator: Arc<dyn TextGenerator>,
}
