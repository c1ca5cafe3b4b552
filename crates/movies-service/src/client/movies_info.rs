//! Client for the movies info service.

use async_trait::async_trait;
use reqwest::Url;
use tracing::instrument;

use movies_core::domain::MovieInfo;

use super::{MovieInfoSource, RetryPolicy, UpstreamClient, UpstreamError, UpstreamStream};

/// Reads metadata from `GET {base}/{id}` and `GET {base}/stream`.
#[derive(Debug, Clone)]
pub struct MoviesInfoClient {
    upstream: UpstreamClient,
}

impl MoviesInfoClient {
    /// Name used in server fault messages.
    pub const SERVICE: &'static str = "MoviesInfoService";

    /// Creates a client rooted at `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: Url, retry: RetryPolicy) -> Self {
        Self {
            upstream: UpstreamClient::new(http, base_url, Self::SERVICE, retry),
        }
    }
}

#[async_trait]
impl MovieInfoSource for MoviesInfoClient {
    #[instrument(skip(self))]
    async fn retrieve_movie_info(&self, movie_id: &str) -> Result<MovieInfo, UpstreamError> {
        self.upstream
            .get_json(Some(movie_id), &[])
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    UpstreamError::ClientFault {
                        message: format!("Movie info with id {movie_id} not found"),
                        status: 404,
                    }
                } else {
                    err
                }
            })
    }

    async fn stream_movie_infos(&self) -> Result<UpstreamStream<MovieInfo>, UpstreamError> {
        self.upstream.stream("stream").await
    }
}
