//! Store contracts consumed by the CRUD services.
//!
//! The services never embed storage logic; they depend only on these traits.
//! `save` assigns an identifier when the record has none and replaces the
//! stored record otherwise.

use async_trait::async_trait;

use crate::domain::{MovieInfo, Review};
use crate::error::DomainError;

/// Repository for movie metadata.
#[async_trait]
pub trait MovieInfoRepository: Send + Sync {
    /// Insert or replace a record, returning it with its identifier set.
    async fn save(&self, movie_info: MovieInfo) -> Result<MovieInfo, DomainError>;

    /// Load a record by identifier.
    async fn find_by_id(&self, id: &str) -> Result<Option<MovieInfo>, DomainError>;

    /// Load every record.
    async fn find_all(&self) -> Result<Vec<MovieInfo>, DomainError>;

    /// Load every record released in `year`.
    async fn find_by_year(&self, year: i32) -> Result<Vec<MovieInfo>, DomainError>;

    /// Load the first record whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<MovieInfo>, DomainError>;

    /// Remove a record. Removing an unknown identifier is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError>;
}

/// Repository for reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert or replace a review, returning it with its identifier set.
    async fn save(&self, review: Review) -> Result<Review, DomainError>;

    /// Load a review by identifier.
    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, DomainError>;

    /// Load every review.
    async fn find_all(&self) -> Result<Vec<Review>, DomainError>;

    /// Load every review referencing `movie_info_id`.
    async fn find_by_movie_info_id(&self, movie_info_id: i64)
    -> Result<Vec<Review>, DomainError>;

    /// Remove a review. Removing an unknown identifier is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError>;
}
