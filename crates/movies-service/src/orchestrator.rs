//! Composes a movie from its metadata and reviews.

use std::sync::Arc;

use tracing::{instrument, warn};

use movies_core::domain::{Movie, MovieInfo};

use crate::client::{MovieInfoSource, ReviewSource, UpstreamError, UpstreamStream};

/// Fans out to both upstream sources for each movie.
#[derive(Clone)]
pub struct MovieOrchestrator {
    movie_infos: Arc<dyn MovieInfoSource>,
    reviews: Arc<dyn ReviewSource>,
}

impl MovieOrchestrator {
    /// Creates an orchestrator over the given sources.
    #[must_use]
    pub fn new(movie_infos: Arc<dyn MovieInfoSource>, reviews: Arc<dyn ReviewSource>) -> Self {
        Self {
            movie_infos,
            reviews,
        }
    }

    /// Fetches metadata and reviews for `movie_id` concurrently.
    ///
    /// A review failure degrades to an empty list. A metadata failure fails
    /// the call and drops the in-flight review fetch.
    ///
    /// # Errors
    ///
    /// Returns the metadata source's error unchanged.
    #[instrument(skip(self))]
    pub async fn compose_movie(&self, movie_id: &str) -> Result<Movie, UpstreamError> {
        let reviews = async {
            match self.reviews.retrieve_reviews(movie_id).await {
                Ok(reviews) => Ok::<_, UpstreamError>(reviews),
                Err(err) => {
                    warn!(movie_id, error = %err, "reviews unavailable, returning movie without reviews");
                    Ok(Vec::new())
                }
            }
        };

        let (movie_info, reviews) =
            tokio::try_join!(self.movie_infos.retrieve_movie_info(movie_id), reviews)?;

        Ok(Movie {
            movie_info,
            reviews,
        })
    }

    /// Opens the upstream metadata stream.
    ///
    /// # Errors
    ///
    /// Returns the metadata source's error if the stream cannot be opened.
    pub async fn stream_movie_infos(&self) -> Result<UpstreamStream<MovieInfo>, UpstreamError> {
        self.movie_infos.stream_movie_infos().await
    }
}
