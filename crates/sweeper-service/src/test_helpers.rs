use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::json;
use sweeper_core::Issue;

pub const TEST_TOKEN: &str = "test-token";

/// What the mock tracker serves.
#[derive(Debug, Clone, Default)]
pub struct TrackerScript {
    pub issues: Vec<Issue>,
    /// Attachment ids whose DELETE answers 404.
    pub missing_attachments: HashSet<String>,
    /// When set, every search answers with this status instead of issues.
    pub search_status: Option<u16>,
}

/// A request as seen by the mock tracker.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw, undecoded query string.
    pub raw_query: Option<String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

struct TrackerState {
    script: TrackerScript,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A running mock tracker. The issues collection lives at `base_url`.
pub struct TestTracker {
    pub base_url: String,
    state: Arc<TrackerState>,
    _handle: std::thread::JoinHandle<()>,
}

impl TestTracker {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "GET")
            .collect()
    }

    pub fn deletes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "DELETE")
            .collect()
    }
}

/// Spawn an axum mock tracker on a random port. The server runs on its own
/// thread and runtime so blocking clients can call it from plain `#[test]`s.
pub fn spawn_test_tracker(script: TrackerScript) -> TestTracker {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}/api/issues");

    let state = Arc::new(TrackerState {
        script,
        requests: Mutex::new(Vec::new()),
    });
    let app = test_router(state.clone());

    let handle = std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    TestTracker {
        base_url,
        state,
        _handle: handle,
    }
}

fn test_router(state: Arc<TrackerState>) -> Router {
    Router::new()
        .route("/api/issues", get(search_issues))
        .route(
            "/api/issues/{issue_id}/attachments/{attachment_id}",
            delete(delete_attachment),
        )
        .with_state(state)
}

fn record(state: &TrackerState, method: Method, uri: &Uri, headers: &HeaderMap) -> bool {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    let authorization = header("authorization");
    let expected = format!("Bearer {TEST_TOKEN}");
    let authorized = authorization.as_deref() == Some(expected.as_str());
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        raw_query: uri.query().map(String::from),
        authorization,
        accept: header("accept"),
    });
    authorized
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "error": msg }))).into_response()
}

async fn search_issues(
    State(state): State<Arc<TrackerState>>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if !record(&state, Method::GET, &uri, &headers) {
        return error_response(StatusCode::UNAUTHORIZED, "unauthorized");
    }
    if let Some(code) = state.script.search_status {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error_response(status, "scripted failure");
    }

    let top = params
        .get("$top")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    let skip = params
        .get("$skip")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let page: Vec<Issue> = state
        .script
        .issues
        .iter()
        .skip(skip)
        .take(top)
        .cloned()
        .collect();
    Json(page).into_response()
}

async fn delete_attachment(
    State(state): State<Arc<TrackerState>>,
    Path((issue_id, attachment_id)): Path<(String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if !record(&state, Method::DELETE, &uri, &headers) {
        return error_response(StatusCode::UNAUTHORIZED, "unauthorized");
    }
    if state.script.missing_attachments.contains(&attachment_id) {
        return error_response(StatusCode::NOT_FOUND, "attachment not found");
    }
    let known = state
        .script
        .issues
        .iter()
        .filter(|i| i.id == issue_id)
        .flat_map(|i| i.attachments.iter())
        .any(|a| a.id == attachment_id);
    if known {
        StatusCode::OK.into_response()
    } else {
        error_response(StatusCode::NOT_FOUND, "attachment not found")
    }
}
