//! Validation rules applied before a record is persisted.
//!
//! Each validator collects every violation, sorts them, and joins them with
//! `,` so the caller sees the full list in a stable order.

use crate::domain::{MovieInfo, Review};
use crate::error::DomainError;

fn into_result(mut violations: Vec<String>) -> Result<(), DomainError> {
    if violations.is_empty() {
        return Ok(());
    }
    violations.sort();
    Err(DomainError::Validation(violations.join(",")))
}

/// Validates a movie-info record.
///
/// # Errors
///
/// Returns `DomainError::Validation` when the name is blank, the year is not
/// positive, the cast is empty, or any cast entry is blank.
pub fn validate_movie_info(movie_info: &MovieInfo) -> Result<(), DomainError> {
    let mut violations = Vec::new();

    if movie_info.name.trim().is_empty() {
        violations.push("name must not be blank".to_owned());
    }
    if movie_info.year <= 0 {
        violations.push("year must be greater than 0".to_owned());
    }
    if movie_info.cast.is_empty() {
        violations.push("cast must not be empty".to_owned());
    }
    for (index, member) in movie_info.cast.iter().enumerate() {
        if member.trim().is_empty() {
            violations.push(format!("cast[{index}] must not be blank"));
        }
    }

    into_result(violations)
}

/// Validates a review.
///
/// # Errors
///
/// Returns `DomainError::Validation` when the movie reference is missing or
/// the rating is negative.
pub fn validate_review(review: &Review) -> Result<(), DomainError> {
    let mut violations = Vec::new();

    if review.movie_info_id.is_none() {
        violations.push("rating.movieInfoId : must not be null".to_owned());
    }
    if review.rating < 0.0 {
        violations.push("rating.negative : please pass a non-negative value".to_owned());
    }

    into_result(violations)
}
