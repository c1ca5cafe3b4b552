//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movies_core::error::DomainError;
use thiserror::Error;
use tracing::{error, info};

/// Startup and runtime errors for the service binaries.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection, pool, or schema error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema bootstrap error.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
///
/// The body is the plain-text error message so callers (including the
/// aggregator's upstream clients) can surface it verbatim.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            info!(error = %self.0, status = status.as_u16(), "request rejected");
        }

        (status, self.0.to_string()).into_response()
    }
}
