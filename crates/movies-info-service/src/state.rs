//! Shared application state.

use std::sync::Arc;

use movies_core::domain::MovieInfo;
use movies_core::relay::ReplayRelay;
use movies_core::repository::MovieInfoRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Movie-info store.
    pub repository: Arc<dyn MovieInfoRepository>,
    /// Relay fed by the create handler and read by `/stream`.
    pub relay: Arc<ReplayRelay<MovieInfo>>,
}

impl AppState {
    /// Create new application state with an empty relay.
    #[must_use]
    pub fn new(repository: Arc<dyn MovieInfoRepository>) -> Self {
        Self {
            repository,
            relay: Arc::new(ReplayRelay::new()),
        }
    }
}
