//! Movies service entry point.

use std::error::Error;
use std::sync::Arc;

use movies_http::config::{ListenerConfig, env_lookup};
use movies_http::server;
use movies_service::client::{MoviesInfoClient, ReviewsClient};
use movies_service::config::UpstreamConfig;
use movies_service::orchestrator::MovieOrchestrator;
use movies_service::routes;
use movies_service::state::AppState;

const DEFAULT_PORT: u16 = 8082;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    server::init_tracing();

    tracing::info!("Starting movies service");

    // Read configuration from environment.
    let listener = ListenerConfig::from_lookup(&env_lookup, DEFAULT_PORT)?;
    let upstream = UpstreamConfig::from_lookup(&env_lookup)?;
    tracing::info!(
        movies_info_url = %upstream.movies_info_url,
        reviews_url = %upstream.reviews_url,
        max_retries = upstream.retry.max_retries,
        "upstream services configured"
    );

    // Build the upstream clients over one connection pool.
    let http = reqwest::Client::builder().build()?;
    let movie_infos = MoviesInfoClient::new(http.clone(), upstream.movies_info_url, upstream.retry);
    let reviews = ReviewsClient::new(http, upstream.reviews_url, upstream.retry);

    // Build application state and router.
    let orchestrator = MovieOrchestrator::new(Arc::new(movie_infos), Arc::new(reviews));
    let app = routes::app(AppState::new(orchestrator));

    server::serve(app, &listener).await?;

    Ok(())
}
