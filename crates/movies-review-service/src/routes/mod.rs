//! HTTP routes.

pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "movies-review-service";

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(movies_http::health::router(SERVICE_NAME))
        .nest("/v1/reviews", reviews::router())
        .with_state(state)
}
