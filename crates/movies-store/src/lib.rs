//! Movies Store: repository implementations.
//!
//! `memory` backs the services when no database is configured and in tests;
//! `pg` persists to PostgreSQL through `sqlx`.

pub mod memory;
pub mod pg;

pub use memory::{InMemoryMovieInfoRepository, InMemoryReviewRepository};
pub use pg::{MIGRATOR, PgMovieInfoRepository, PgReviewRepository, connect};

/// Generates a new opaque record identifier.
fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
