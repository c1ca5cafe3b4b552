//! Routes for movie metadata.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};

use movies_core::domain::MovieInfo;
use movies_http::error::ApiError;
use movies_http::ndjson::ndjson_response;

use crate::application::query_handlers::MovieInfoFilter;
use crate::application::{command_handlers, query_handlers};
use crate::state::AppState;

/// Query string for GET /.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Filter by release year.
    pub year: Option<i32>,
    /// Filter by exact name.
    pub name: Option<String>,
}

/// GET /
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<MovieInfo>>, ApiError> {
    let filter = MovieInfoFilter {
        year: params.year,
        name: params.name,
    };
    let records = query_handlers::list_movie_infos(&filter, &*state.repository).await?;
    Ok(Json(records))
}

/// GET /{id}
#[instrument(skip(state))]
async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let found = query_handlers::get_movie_info_by_id(&id, &*state.repository).await?;
    Ok(match found {
        Some(movie_info) => Json(movie_info).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// POST /
#[instrument(skip(state, movie_info), fields(name = %movie_info.name))]
async fn create(
    State(state): State<AppState>,
    Json(movie_info): Json<MovieInfo>,
) -> Result<(StatusCode, Json<MovieInfo>), ApiError> {
    info!("handling create movie info");
    let saved =
        command_handlers::handle_create(movie_info, &*state.repository, &state.relay).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /{id}
#[instrument(skip(state, changes))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<MovieInfo>,
) -> Result<Response, ApiError> {
    let updated = command_handlers::handle_update(&id, changes, &*state.repository).await?;
    Ok(match updated {
        Some(movie_info) => Json(movie_info).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
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
    info!("movie info stream subscriber connected");
    ndjson_response(state.relay.subscribe())
}

/// Returns the router for movie metadata.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/stream", get(stream))
        .route("/{id}", get(show).put(update).delete(delete))
}
