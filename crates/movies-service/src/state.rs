//! Shared application state.

use std::sync::Arc;

use crate::orchestrator::MovieOrchestrator;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Composes movies from the upstream services.
    pub orchestrator: Arc<MovieOrchestrator>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(orchestrator: MovieOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}
