//! Test repositories: failing implementations of the store traits.

use async_trait::async_trait;
use movies_core::domain::{MovieInfo, Review};
use movies_core::error::DomainError;
use movies_core::repository::{MovieInfoRepository, ReviewRepository};

fn refused() -> DomainError {
    DomainError::Infrastructure("connection refused".into())
}

/// A movie-info repository that always returns an infrastructure error.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingMovieInfoRepository;

#[async_trait]
impl MovieInfoRepository for FailingMovieInfoRepository {
    async fn save(&self, _movie_info: MovieInfo) -> Result<MovieInfo, DomainError> {
        Err(refused())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<MovieInfo>, DomainError> {
        Err(refused())
    }

    async fn find_all(&self) -> Result<Vec<MovieInfo>, DomainError> {
        Err(refused())
    }

    async fn find_by_year(&self, _year: i32) -> Result<Vec<MovieInfo>, DomainError> {
        Err(refused())
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<MovieInfo>, DomainError> {
        Err(refused())
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), DomainError> {
        Err(refused())
    }
}

/// A review repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingReviewRepository;

#[async_trait]
impl ReviewRepository for FailingReviewRepository {
    async fn save(&self, _review: Review) -> Result<Review, DomainError> {
        Err(refused())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Review>, DomainError> {
        Err(refused())
    }

    async fn find_all(&self) -> Result<Vec<Review>, DomainError> {
        Err(refused())
    }

    async fn find_by_movie_info_id(
        &self,
        _movie_info_id: i64,
    ) -> Result<Vec<Review>, DomainError> {
        Err(refused())
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), DomainError> {
        Err(refused())
    }
}
