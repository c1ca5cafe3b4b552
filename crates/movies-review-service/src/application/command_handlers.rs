//! Command handlers for reviews.

use movies_core::domain::Review;
use movies_core::error::DomainError;
use movies_core::relay::ReplayRelay;
use movies_core::repository::ReviewRepository;
use movies_core::validation::validate_review;
use tracing::info;

fn review_not_found(id: &str) -> DomainError {
    DomainError::NotFound(format!("Review not found for the given review id {id}"))
}

/// Validates and persists a new review, then publishes it to `relay`.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the review is invalid, or the
/// store's error if persistence fails. Nothing is published on failure.
pub async fn handle_create(
    mut review: Review,
    repo: &dyn ReviewRepository,
    relay: &ReplayRelay<Review>,
) -> Result<Review, DomainError> {
    validate_review(&review)?;
    review.review_id = None;

    let saved = repo.save(review).await?;
    info!(review_id = ?saved.review_id, movie_info_id = ?saved.movie_info_id, "review created");

    relay.publish(saved.clone());
    Ok(saved)
}

/// Overwrites the comment and rating of an existing review.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no review has `id`,
/// `DomainError::Validation` if the new rating is negative, or the store's
/// error if loading or saving fails.
pub async fn handle_update(
    id: &str,
    changes: Review,
    repo: &dyn ReviewRepository,
) -> Result<Review, DomainError> {
    let mut existing = repo.find_by_id(id).await?.ok_or_else(|| review_not_found(id))?;
    existing.apply_update(changes);
    validate_review(&existing)?;
    repo.save(existing).await
}

/// Removes a review.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no review has `id`, or the store's
/// error if the delete fails.
pub async fn handle_delete(id: &str, repo: &dyn ReviewRepository) -> Result<(), DomainError> {
    if repo.find_by_id(id).await?.is_none() {
        return Err(review_not_found(id));
    }
    repo.delete_by_id(id).await
}
