//! Shared application state.

use std::sync::Arc;

use movies_core::domain::Review;
use movies_core::relay::ReplayRelay;
use movies_core::repository::ReviewRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Review store.
    pub repository: Arc<dyn ReviewRepository>,
    /// Relay fed by the create handler and read by `/stream`.
    pub relay: Arc<ReplayRelay<Review>>,
}

impl AppState {
    /// Create new application state with an empty relay.
    #[must_use]
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
        Self {
            repository,
            relay: Arc::new(ReplayRelay::new()),
        }
    }
}
