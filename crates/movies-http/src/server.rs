//! Process bootstrap: tracing and the HTTP listener.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::ListenerConfig;
use crate::error::AppError;

/// Installs the JSON tracing subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();
}

/// Wraps a fully built router with the layers every service uses.
pub fn with_layers(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds the configured address and serves `router` until the process exits.
///
/// # Errors
///
/// Returns `AppError` if the address is invalid or the listener fails.
pub async fn serve(router: Router, listener: &ListenerConfig) -> Result<(), AppError> {
    let addr = listener.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let tcp = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(tcp, with_layers(router)).await?;

    Ok(())
}
