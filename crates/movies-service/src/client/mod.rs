//! HTTP clients for the two catalog services.
//!
//! `UpstreamClient` owns the request, classification, and retry mechanics.
//! `MoviesInfoClient` and `ReviewsClient` wrap it with the per-service
//! contracts and implement the source traits the orchestrator consumes.

pub mod error;
pub mod movies_info;
pub mod ndjson;
pub mod response;
pub mod retry;
pub mod reviews;

use std::pin::Pin;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use movies_core::domain::{MovieInfo, Review};

pub use error::UpstreamError;
pub use movies_info::MoviesInfoClient;
pub use retry::{RetryBudget, RetryPolicy};
pub use reviews::ReviewsClient;

use ndjson::LineBuffer;
use response::{classify, decode, fault};

/// Items buffered between the background reader and the consumer.
const STREAM_BUFFER: usize = 64;

/// A live sequence of upstream records. A fault, if any, is the last item.
pub type UpstreamStream<T> = Pin<Box<dyn Stream<Item = Result<T, UpstreamError>> + Send>>;

/// Where the aggregator reads movie metadata from.
#[async_trait]
pub trait MovieInfoSource: Send + Sync {
    /// Loads the metadata record for `movie_id`.
    async fn retrieve_movie_info(&self, movie_id: &str) -> Result<MovieInfo, UpstreamError>;

    /// Opens the replay-all stream of created metadata records.
    async fn stream_movie_infos(&self) -> Result<UpstreamStream<MovieInfo>, UpstreamError>;
}

/// Where the aggregator reads reviews from.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Loads every review referencing `movie_id`.
    async fn retrieve_reviews(&self, movie_id: &str) -> Result<Vec<Review>, UpstreamError>;
}

/// Retrying JSON client bound to one upstream base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    service: &'static str,
    retry: RetryPolicy,
}

enum Forwarded {
    /// The upstream finished the body or the consumer went away.
    Ended,
    Failed(UpstreamError),
}

impl UpstreamClient {
    /// Creates a client for `service` rooted at `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: Url, service: &'static str, retry: RetryPolicy) -> Self {
        Self {
            http,
            base_url,
            service,
            retry,
        }
    }

    /// The base URL with `segment` appended as one percent-encoded path
    /// segment.
    ///
    /// `.` and `..` would be resolved away instead of appended, so they are
    /// answered locally as a 404.
    fn endpoint(&self, segment: Option<&str>) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        if let Some(segment) = segment {
            if matches!(segment, "." | "..") {
                return Err(UpstreamError::ClientFault {
                    message: format!("no resource at {segment}"),
                    status: 404,
                });
            }
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(segment);
            }
        }
        Ok(url)
    }

    async fn fetch_once(&self, url: &Url, query: &[(&str, &str)]) -> Result<Vec<u8>, UpstreamError> {
        let response = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| UpstreamError::server_fault(self.service, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::server_fault(self.service, e))?;
        classify(self.service, status, body.to_vec())
    }

    /// GETs `segment` under the base URL and decodes the JSON body, retrying
    /// server faults.
    ///
    /// # Errors
    ///
    /// Returns the classified `UpstreamError` once retries are exhausted.
    pub async fn get_json<T>(&self, segment: Option<&str>, query: &[(&str, &str)]) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let url = &self.endpoint(segment)?;
        debug!(service = self.service, %url, "calling upstream");
        self.retry
            .run(self.service, move || async move {
                let body = self.fetch_once(url, query).await?;
                decode(self.service, &body)
            })
            .await
    }

    async fn open_once(&self, url: &Url) -> Result<reqwest::Response, UpstreamError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| UpstreamError::server_fault(self.service, e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::server_fault(self.service, e))?;
        Err(fault(self.service, status, body))
    }

    /// Opens the NDJSON stream at `segment` and forwards its records.
    ///
    /// Opening is retried like any other call. A background task then reads
    /// the body; after a mid-stream server fault it reconnects, skipping the
    /// records it already delivered, and spends the same retry budget. When
    /// the budget is gone the fault is sent as the final item. Dropping the
    /// returned stream stops the task.
    ///
    /// # Errors
    ///
    /// Returns the classified `UpstreamError` if the stream cannot be opened.
    pub async fn stream<T>(&self, segment: &str) -> Result<UpstreamStream<T>, UpstreamError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.endpoint(Some(segment))?;
        let mut budget = self.retry.budget();
        let response = loop {
            match self.open_once(&url).await {
                Ok(response) => break response,
                Err(err) => {
                    if !budget.wait_for_retry(self.service, &err).await {
                        return Err(err);
                    }
                }
            }
        };

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let watcher = tx.clone();
        let client = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = watcher.closed() => {
                    debug!(service = client.service, "stream consumer went away");
                }
                () = client.pump(url, response, budget, tx) => {}
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }

    async fn pump<T>(
        &self,
        url: Url,
        response: reqwest::Response,
        mut budget: RetryBudget,
        tx: mpsc::Sender<Result<T, UpstreamError>>,
    ) where
        T: DeserializeOwned + Send,
    {
        let mut delivered = 0usize;
        let mut next = Ok(response);
        loop {
            let err = match next {
                Ok(response) => match self.forward(response, &mut delivered, &tx).await {
                    Forwarded::Ended => return,
                    Forwarded::Failed(err) => err,
                },
                Err(err) => err,
            };
            if !budget.wait_for_retry(self.service, &err).await {
                warn!(service = self.service, error = %err, "upstream stream failed");
                // The consumer may already be gone.
                let _ = tx.send(Err(err)).await;
                return;
            }
            next = self.open_once(&url).await;
        }
    }

    /// Sends every record of one connection past the first `delivered`.
    async fn forward<T>(
        &self,
        mut response: reqwest::Response,
        delivered: &mut usize,
        tx: &mpsc::Sender<Result<T, UpstreamError>>,
    ) -> Forwarded
    where
        T: DeserializeOwned + Send,
    {
        let mut lines = LineBuffer::default();
        let mut seen = 0usize;
        loop {
            let line = match lines.next_line() {
                Some(line) => line,
                None => match response.chunk().await {
                    Ok(Some(chunk)) => {
                        lines.push(&chunk);
                        continue;
                    }
                    Ok(None) => match lines.finish() {
                        Some(line) => line,
                        None => return Forwarded::Ended,
                    },
                    Err(e) => return Forwarded::Failed(UpstreamError::server_fault(self.service, e)),
                },
            };

            seen += 1;
            if seen <= *delivered {
                continue;
            }
            let record = match decode(self.service, &line) {
                Ok(record) => record,
                Err(err) => return Forwarded::Failed(err),
            };
            if tx.send(Ok(record)).await.is_err() {
                return Forwarded::Ended;
            }
            *delivered += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::Router;
    use axum::body::Body;
    use axum::extract::State;
    use axum::routing::get;
    use serde::Deserialize;
    use tokio::net::TcpListener;
    use tokio_stream::StreamExt;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        n: u32,
    }

    fn quick_client(base_url: &str, max_retries: u32) -> UpstreamClient {
        UpstreamClient::new(
            reqwest::Client::new(),
            base_url.parse().unwrap(),
            "MoviesInfoService",
            RetryPolicy {
                max_retries,
                backoff: Duration::ZERO,
            },
        )
    }

    /// Serves `/things/stream`. The first connection sends one record and
    /// then breaks; later connections send the full history.
    async fn flaky_stream_server() -> (String, Arc<AtomicUsize>) {
        async fn stream(State(connections): State<Arc<AtomicUsize>>) -> Body {
            if connections.fetch_add(1, Ordering::SeqCst) == 0 {
                let chunks: Vec<Result<String, std::io::Error>> = vec![
                    Ok("{\"n\":1}\n".into()),
                    Err(std::io::Error::other("connection reset")),
                ];
                // Throttled so the first record is flushed before the reset.
                Body::from_stream(tokio_stream::iter(chunks).throttle(Duration::from_millis(50)))
            } else {
                Body::from("{\"n\":1}\n{\"n\":2}\n{\"n\":3}\n")
            }
        }

        let connections = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/things/stream", get(stream))
            .with_state(Arc::clone(&connections));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}/things"), connections)
    }

    #[test]
    fn test_endpoint_appends_encoded_segment() {
        let client = quick_client("http://localhost:8080/api/v1/movies-info", 0);

        assert_eq!(
            client.endpoint(Some("a b")).unwrap().as_str(),
            "http://localhost:8080/api/v1/movies-info/a%20b"
        );
        assert_eq!(
            client.endpoint(None).unwrap().as_str(),
            "http://localhost:8080/api/v1/movies-info"
        );
    }

    #[test]
    fn test_dot_segments_are_not_found_without_a_request() {
        let client = quick_client("http://localhost:8080/api/v1/movies-info", 0);

        for segment in [".", ".."] {
            let err = client.endpoint(Some(segment)).unwrap_err();

            assert!(err.is_not_found(), "{segment}");
        }
    }

    #[tokio::test]
    async fn test_stream_reconnects_without_duplicating_records() {
        // Arrange
        let (base_url, connections) = flaky_stream_server().await;
        let client = quick_client(&base_url, 3);

        // Act
        let records: Vec<_> = client
            .stream::<Record>("stream")
            .await
            .unwrap()
            .collect()
            .await;

        // Assert
        assert_eq!(
            records,
            vec![Ok(Record { n: 1 }), Ok(Record { n: 2 }), Ok(Record { n: 3 })]
        );
        assert_eq!(connections.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stream_ends_with_fault_when_budget_is_spent() {
        // Arrange
        let (base_url, connections) = flaky_stream_server().await;
        let client = quick_client(&base_url, 0);

        // Act
        let records: Vec<_> = client
            .stream::<Record>("stream")
            .await
            .unwrap()
            .collect()
            .await;

        // Assert
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Ok(Record { n: 1 }));
        assert!(matches!(&records[1], Err(UpstreamError::ServerFault(msg))
            if msg.starts_with("Server Exception in MoviesInfoService ")));
        assert_eq!(connections.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_server_fault() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = quick_client(&format!("http://{addr}/things"), 1);

        let result = client.get_json::<Record>(Some("1"), &[]).await;

        assert!(matches!(result, Err(UpstreamError::ServerFault(msg))
            if msg.starts_with("Server Exception in MoviesInfoService ")));
    }
}
