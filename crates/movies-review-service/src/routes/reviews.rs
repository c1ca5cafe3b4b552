//! Routes for reviews.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};

use movies_core::domain::Review;
use movies_http::error::ApiError;
use movies_http::ndjson::ndjson_response;

use crate::application::{command_handlers, query_handlers};
use crate::state::AppState;

/// Query string for GET /.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Only reviews referencing this movie.
    pub movie_info_id: Option<i64>,
}

/// GET /
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = query_handlers::list_reviews(params.movie_info_id, &*state.repository).await?;
    Ok(Json(reviews))
}

/// POST /
#[instrument(skip(state, review), fields(movie_info_id = ?review.movie_info_id))]
async fn create(
    State(state): State<AppState>,
    Json(review): Json<Review>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    info!("handling create review");
    let saved = command_handlers::handle_create(review, &*state.repository, &state.relay).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /{id}
#[instrument(skip(state, changes))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<Review>,
) -> Result<Json<Review>, ApiError> {
    let updated = command_handlers::handle_update(&id, changes, &*state.repository).await?;
    Ok(Json(updated))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    command_handlers::handle_delete(&id, &*state.repository).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /stream
async fn stream(State(state): State<AppState>) -> Response {
    info!("review stream subscriber connected");
    ndjson_response(state.relay.subscribe())
}

/// Returns the router for reviews.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/stream", get(stream))
        .route("/{id}", put(update).delete(delete))
}
