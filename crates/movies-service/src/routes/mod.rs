//! HTTP routes.

pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "movies-service";

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(movies_http::health::router(SERVICE_NAME))
        .nest("/v1/movies", movies::router())
        .with_state(state)
}
