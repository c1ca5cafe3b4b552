//! Shared test helpers for aggregator integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use movies_service::client::{MoviesInfoClient, RetryPolicy, ReviewsClient};
use movies_service::orchestrator::MovieOrchestrator;
use movies_service::routes;
use movies_service::state::AppState;
use movies_test_support::StubUpstream;

pub const MOVIES_INFO_PATH: &str = "/api/v1/movies-info";
pub const REVIEWS_PATH: &str = "/v1/reviews";

/// Retry policy with the production count and no waiting.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        backoff: Duration::from_millis(1),
    }
}

/// Build the full app router with both clients pointed at `stub`. Uses the
/// same wiring as `main.rs`.
pub fn build_test_app(stub: &StubUpstream) -> Router {
    let http = reqwest::Client::new();
    let movie_infos = MoviesInfoClient::new(
        http.clone(),
        stub.url(MOVIES_INFO_PATH).parse().unwrap(),
        fast_retry(),
    );
    let reviews = ReviewsClient::new(http, stub.url(REVIEWS_PATH).parse().unwrap(), fast_retry());
    let orchestrator = MovieOrchestrator::new(Arc::new(movie_infos), Arc::new(reviews));
    routes::app(AppState::new(orchestrator))
}

/// Send a GET request and return the status and raw body text.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Send a GET request and parse the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, text) = get_text(app, uri).await;
    (status, serde_json::from_str(&text).unwrap())
}
