//! Client for the movies review service.

use async_trait::async_trait;
use reqwest::Url;
use tracing::instrument;

use movies_core::domain::Review;

use super::{RetryPolicy, ReviewSource, UpstreamClient, UpstreamError};

/// Reads reviews from `GET {base}?movieInfoId={id}`.
#[derive(Debug, Clone)]
pub struct ReviewsClient {
    upstream: UpstreamClient,
}

impl ReviewsClient {
    /// Name used in server fault messages.
    pub const SERVICE: &'static str = "ReviewsService";

    /// Creates a client rooted at `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: Url, retry: RetryPolicy) -> Self {
        Self {
            upstream: UpstreamClient::new(http, base_url, Self::SERVICE, retry),
        }
    }
}

#[async_trait]
impl ReviewSource for ReviewsClient {
    /// A 404 from the review service means the movie has no reviews.
    #[instrument(skip(self))]
    async fn retrieve_reviews(&self, movie_id: &str) -> Result<Vec<Review>, UpstreamError> {
        match self
            .upstream
            .get_json(None, &[("movieInfoId", movie_id)])
            .await
        {
            Err(err) if err.is_not_found() => Ok(Vec::new()),
            outcome => outcome,
        }
    }
}
