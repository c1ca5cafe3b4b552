//! Review record.

use serde::{Deserialize, Serialize};

/// A user review of a movie, owned by the movies-review service.
///
/// `movie_info_id` is a plain reference; the review service never checks
/// that the referenced movie exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Store-assigned identifier.
    #[serde(default)]
    pub review_id: Option<String>,
    /// The movie this review refers to.
    #[serde(default)]
    pub movie_info_id: Option<i64>,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
    /// Non-negative score.
    #[serde(default)]
    pub rating: f64,
}

impl Review {
    /// Creates an unsaved review with no identifier.
    #[must_use]
    pub fn new(movie_info_id: i64, comment: impl Into<String>, rating: f64) -> Self {
        Self {
            review_id: None,
            movie_info_id: Some(movie_info_id),
            comment: comment.into(),
            rating,
        }
    }

    /// Returns a copy carrying `id`.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.review_id = Some(id.into());
        self
    }

    /// Overwrites the comment and rating from `changes`. The movie reference
    /// and identifier are left as they are.
    pub fn apply_update(&mut self, changes: Review) {
        self.comment = changes.comment;
        self.rating = changes.rating;
    }
}
