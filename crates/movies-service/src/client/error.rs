//! Upstream failure taxonomy.

use std::fmt::Display;

use thiserror::Error;

/// Failure of a call to an upstream catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The upstream rejected the request (4xx). Never retried.
    #[error("{message}")]
    ClientFault {
        /// Upstream body, or a synthesized message for 404s.
        message: String,
        /// Upstream status code.
        status: u16,
    },

    /// The upstream failed (5xx, transport error, or undecodable body).
    #[error("{0}")]
    ServerFault(String),
}

impl UpstreamError {
    /// Builds a `ServerFault` attributed to `service`.
    pub fn server_fault(service: &str, detail: impl Display) -> Self {
        Self::ServerFault(format!("Server Exception in {service} {detail}"))
    }

    /// Whether this is a `ClientFault` with status 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ClientFault { status: 404, .. })
    }

    /// Whether the retry policy may try the call again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ServerFault(_))
    }
}
