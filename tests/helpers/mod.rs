//! Shared test harness: a mock upstream server and app construction helpers.
#![allow(dead_code)]

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::{Router, routing::get};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use todoproxy::cache::TodoCache;
use todoproxy::snapshot::SnapshotStore;
use todoproxy::state::AppState;
use todoproxy::upstream::UpstreamApi;
use todoproxy::web::create_router;
use todoproxy::web::middleware::rate_limit::AdmissionController;

/// A live mock of the upstream todos API.
pub struct MockUpstream {
    pub url: String,
    pub hits: Arc<AtomicUsize>,
    pub last_query: Arc<Mutex<Option<String>>>,
}

impl MockUpstream {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<String>>>,
    payload: Arc<Value>,
    status: StatusCode,
}

async fn serve_todos(
    State(state): State<MockState>,
    RawQuery(query): RawQuery,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = query;
    (state.status, Json((*state.payload).clone()))
}

/// Spawn an upstream serving `payload` with `status` on an ephemeral port.
pub async fn spawn_upstream(payload: Value, status: StatusCode) -> MockUpstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let last_query = Arc::new(Mutex::new(None));
    let state = MockState {
        hits: hits.clone(),
        last_query: last_query.clone(),
        payload: Arc::new(payload),
        status,
    };

    let router = Router::new()
        .route("/todos", get(serve_todos))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockUpstream {
        url: format!("http://{addr}/todos"),
        hits,
        last_query,
    }
}

/// Build an isolated application state from explicit components.
pub fn make_state(
    upstream_url: &str,
    snapshot: SnapshotStore,
    cache_ttl: Duration,
    window: Duration,
    max_requests: u32,
) -> AppState {
    AppState {
        cache: TodoCache::new(cache_ttl),
        snapshot,
        upstream: Arc::new(UpstreamApi::new(upstream_url.to_string())),
        admission: AdmissionController::new(window, max_requests),
    }
}

/// Serve the proxy router on an ephemeral port, returning its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    format!("http://{addr}")
}

pub fn todos_payload() -> Value {
    json!([
        {"id": 1, "title": "delectus aut autem", "completed": false},
        {"id": 2, "title": "quis ut nam facilis", "completed": true}
    ])
}
