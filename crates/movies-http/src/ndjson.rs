//! Newline-delimited JSON streaming responses.

use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tokio_stream::{Stream, StreamExt};

/// Media type of every `/stream` endpoint.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Serializes each item of `stream` as one JSON line of the response body.
///
/// The body ends when the stream ends; dropping the response (for example
/// when the client disconnects) drops the stream.
pub fn ndjson_response<S, T>(stream: S) -> Response
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + 'static,
{
    let lines = stream.map(|item| {
        serde_json::to_vec(&item).map(|mut line| {
            line.push(b'\n');
            line
        })
    });
    ([(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)], Body::from_stream(lines)).into_response()
}
