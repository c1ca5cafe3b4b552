//! Movies review service entry point.

use std::error::Error;
use std::sync::Arc;

use movies_core::repository::ReviewRepository;
use movies_http::config::{ListenerConfig, env_lookup};
use movies_http::server;
use movies_review_service::routes;
use movies_review_service::state::AppState;
use movies_store::{InMemoryReviewRepository, PgReviewRepository};

const DEFAULT_PORT: u16 = 8081;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    server::init_tracing();

    tracing::info!("Starting movies review service");

    // Read configuration from environment.
    let listener = ListenerConfig::from_lookup(&env_lookup, DEFAULT_PORT)?;

    // Pick the store.
    let repository: Arc<dyn ReviewRepository> = match env_lookup("DATABASE_URL") {
        Some(database_url) => {
            let pool = movies_store::connect(&database_url).await?;
            Arc::new(PgReviewRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(InMemoryReviewRepository::new())
        }
    };

    // Build application state and router.
    let app = routes::app(AppState::new(repository));

    server::serve(app, &listener).await?;

    Ok(())
}
