//! Movies info service entry point.

use std::error::Error;
use std::sync::Arc;

use movies_core::repository::MovieInfoRepository;
use movies_http::config::{ListenerConfig, env_lookup};
use movies_http::server;
use movies_info_service::routes;
use movies_info_service::state::AppState;
use movies_store::{InMemoryMovieInfoRepository, PgMovieInfoRepository};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    server::init_tracing();

    tracing::info!("Starting movies info service");

    // Read configuration from environment.
    let listener = ListenerConfig::from_lookup(&env_lookup, DEFAULT_PORT)?;

    // Pick the store.
    let repository: Arc<dyn MovieInfoRepository> = match env_lookup("DATABASE_URL") {
        Some(database_url) => {
            let pool = movies_store::connect(&database_url).await?;
            Arc::new(PgMovieInfoRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(InMemoryMovieInfoRepository::new())
        }
    };

    // Build application state and router.
    let app = routes::app(AppState::new(repository));

    server::serve(app, &listener).await?;

    Ok(())
}
