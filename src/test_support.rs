//! In-process mock of the project-management backend.
//!
//! Serves canned JSON responses keyed by method and path, and records every
//! request it receives so tests can assert on headers and bodies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::client::ApiClient;
use crate::config::{Config, Options};

pub const TEST_ASSISTANT_ID: &str = "claude-test";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<HashMap<(String, String), (u16, Value)>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Default)]
pub struct MockBackendBuilder {
    routes: HashMap<(String, String), (u16, Value)>,
}

impl MockBackendBuilder {
    pub fn route(mut self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.routes
            .insert((method.to_string(), path.to_string()), (status, body));
        self
    }

    pub async fn start(self) -> MockBackend {
        let state = MockState {
            routes: Arc::new(self.routes),
            requests: Arc::default(),
        };
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockBackend {
            url: format!("http://{}", addr),
            requests: state.requests,
            handle,
        }
    }
}

pub struct MockBackend {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    /// Client for project `p` with API key `k` pointed at this backend.
    pub fn client(&self) -> ApiClient {
        client_for(&self.url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn client_for(url: &str) -> ApiClient {
    let config = Config::new("k", "p")
        .with_base_url(url)
        .with_assistant_id(TEST_ASSISTANT_ID)
        .with_timeout(Duration::from_secs(5));
    ApiClient::new(config, Options::default()).unwrap()
}

/// URL of a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect(),
        body: serde_json::from_slice(&body).ok(),
    };
    let key = (request.method.clone(), request.path.clone());
    state.requests.lock().unwrap().push(request);

    match state.routes.get(&key) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap(),
            Json(body.clone()),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("no route for {} {}", key.0, key.1)})),
        ),
    }
}

/// Parse the single JSON text block of a tool result.
pub fn tool_json(result: &CallToolResult) -> Value {
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).unwrap()
}
