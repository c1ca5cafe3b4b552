//! HTTP mapping for upstream failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use crate::client::UpstreamError;

/// HTTP-layer wrapper around `UpstreamError` that implements `IntoResponse`.
///
/// A client fault keeps the upstream status and message; a server fault is
/// a 500 carrying the fault message.
#[derive(Debug)]
pub struct ApiError(pub UpstreamError);

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            UpstreamError::ClientFault { message, status } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
                info!(error = %message, status = status.as_u16(), "upstream rejected request");
                (status, message).into_response()
            }
            UpstreamError::ServerFault(message) => {
                error!(error = %message, "upstream failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
