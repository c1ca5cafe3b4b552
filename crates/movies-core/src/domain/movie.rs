//! Composed movie view.

use serde::{Deserialize, Serialize};

use super::{MovieInfo, Review};

/// Metadata plus reviews for one movie. Built per request by the
/// aggregator and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// The movie's metadata.
    pub movie_info: MovieInfo,
    /// Reviews referencing the movie, in upstream order.
    pub reviews: Vec<Review>,
}
