//! HTTP routes.

pub mod movies_info;

use axum::Router;

use crate::state::AppState;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "movies-info-service";

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(movies_http::health::router(SERVICE_NAME))
        .nest("/api/v1/movies-info", movies_info::router())
        .with_state(state)
}
