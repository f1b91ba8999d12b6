use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable chat backend. Default: `LlmClient` against the configured provider.
    pub llm: Arc<dyn ChatBackend>,
    pub config: Config,
}
