use std::sync::Arc;

use scout_rag::ScoutBot;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Initialized pipeline; immutable and shared across requests.
    pub bot: Arc<ScoutBot>,
}

impl AppState {
    pub fn new(bot: Arc<ScoutBot>) -> Self {
        Self { bot }
    }
}
