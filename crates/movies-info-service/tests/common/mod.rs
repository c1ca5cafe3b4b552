//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, BodyDataStream};
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio_stream::StreamExt;
use tower::ServiceExt;

use movies_info_service::routes;
use movies_info_service::state::AppState;
use movies_store::InMemoryMovieInfoRepository;

/// Build the full app router over a fresh in-memory store. Uses the same
/// route structure as `main.rs`. Clone the returned router per request.
pub fn build_test_app() -> Router {
    routes::app(AppState::new(Arc::new(InMemoryMovieInfoRepository::new())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&body_bytes).into()))
    };
    (status, json)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send a POST request with a JSON body and return the response. Non-JSON
/// bodies come back as a JSON string.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("POST", uri, body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("PUT", uri, body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Send a DELETE request and return the status.
pub async fn delete(app: Router, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap().status()
}

/// Open a streaming GET and return the status and body frames.
pub async fn open_stream(app: Router, uri: &str) -> (StatusCode, BodyDataStream) {
    let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    (response.status(), response.into_body().into_data_stream())
}

/// Read the next NDJSON line from a streaming body.
pub async fn next_line(body: &mut BodyDataStream) -> serde_json::Value {
    let chunk = tokio::time::timeout(Duration::from_secs(2), body.next())
        .await
        .expect("timed out waiting for stream line")
        .expect("stream ended")
        .unwrap();
    assert_eq!(chunk.last(), Some(&b'\n'));
    serde_json::from_slice(&chunk).unwrap()
}
