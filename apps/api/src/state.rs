use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::store::StoreClient;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreClient,
    /// Pluggable text generator. Production: `LlmClient`; tests substitute a
    /// canned or failing implementation.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
