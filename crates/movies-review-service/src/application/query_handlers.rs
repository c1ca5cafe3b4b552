//! Query handlers for reviews.

use movies_core::domain::Review;
use movies_core::error::DomainError;
use movies_core::repository::ReviewRepository;

/// Lists reviews, restricted to one movie when `movie_info_id` is given.
///
/// # Errors
///
/// Returns the store's error if the query fails.
pub async fn list_reviews(
    movie_info_id: Option<i64>,
    repo: &dyn ReviewRepository,
) -> Result<Vec<Review>, DomainError> {
    match movie_info_id {
        Some(movie_info_id) => repo.find_by_movie_info_id(movie_info_id).await,
        None => repo.find_all().await,
    }
}
