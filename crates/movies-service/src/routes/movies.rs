//! Routes for composed movies.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use tokio_stream::StreamExt;
use tracing::{error, info, instrument};

use movies_core::domain::Movie;
use movies_http::ndjson::ndjson_response;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{id}
#[instrument(skip(state))]
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state.orchestrator.compose_movie(&id).await?;
    Ok(Json(movie))
}

/// GET /stream
async fn stream(State(state): State<AppState>) -> Result<Response, ApiError> {
    let upstream = state.orchestrator.stream_movie_infos().await?;
    info!("movie info stream subscriber connected");

    let movie_infos = upstream.map_while(|item| match item {
        Ok(movie_info) => Some(movie_info),
        Err(err) => {
            error!(error = %err, "movie info stream ended by upstream fault");
            None
        }
    });
    Ok(ndjson_response(movie_infos))
}

/// Returns the router for composed movies.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stream", get(stream))
        .route("/{id}", get(show))
}
