//! Health and status handlers.

use axum::response::Json;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::trace;

#[derive(Serialize)]
pub struct StatusResponse {
    version: String,
    commit: String,
}

/// Health check endpoint
pub(super) async fn health() -> Json<Value> {
    trace!("health check requested");
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Build/version information for deploy verification.
pub(super) async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: env!("GIT_COMMIT_HASH").to_string(),
    })
}
