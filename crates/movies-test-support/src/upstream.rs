//! Stub upstream: a scripted HTTP server for exercising real clients.
//!
//! `StubUpstream` binds an ephemeral port, answers each request path with
//! the response scripted for it, and records every request it receives so
//! tests can assert on hit counts and query strings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
struct Scripted {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Debug, Default)]
struct StubState {
    responses: Mutex<HashMap<String, Scripted>>,
    requests: Mutex<Vec<(String, Option<String>)>>,
}

async fn respond(State(state): State<Arc<StubState>>, uri: Uri) -> Response {
    let path = uri.path().to_owned();
    state
        .requests
        .lock()
        .unwrap()
        .push((path.clone(), uri.query().map(str::to_owned)));

    let scripted = state.responses.lock().unwrap().get(&path).cloned();
    match scripted {
        Some(scripted) => {
            if !scripted.delay.is_zero() {
                tokio::time::sleep(scripted.delay).await;
            }
            (
                scripted.status,
                [(header::CONTENT_TYPE, "application/json")],
                scripted.body,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("no stub for {path}")).into_response(),
    }
}

/// A running stub server. The server stops when this value is dropped.
#[derive(Debug)]
pub struct StubUpstream {
    base_url: String,
    state: Arc<StubState>,
    server: JoinHandle<()>,
}

impl StubUpstream {
    /// Binds `127.0.0.1:0` and starts serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new().fallback(respond).with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    /// Absolute URL of `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Answers `path` with `status` and `body`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stub(&self, path: &str, status: u16, body: impl Into<String>) {
        self.stub_delayed(path, status, body, Duration::ZERO);
    }

    /// Answers `path` with `200 OK` and `body` serialized as JSON.
    pub fn stub_json(&self, path: &str, body: &serde_json::Value) {
        self.stub(path, 200, body.to_string());
    }

    /// Answers `path` with `status` and `body` after waiting `delay`.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a valid HTTP status code or the internal
    /// mutex is poisoned.
    pub fn stub_delayed(&self, path: &str, status: u16, body: impl Into<String>, delay: Duration) {
        let scripted = Scripted {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            delay,
        };
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(path.to_owned(), scripted);
    }

    /// Number of requests received for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn hits(&self, path: &str) -> usize {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    /// Query strings of every request received for `path`, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn queries(&self, path: &str) -> Vec<Option<String>> {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }
}

impl Drop for StubUpstream {
    fn drop(&mut self) {
        self.server.abort();
    }
}
