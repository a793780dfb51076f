//! User-facing error taxonomy for the proxy endpoint.

use crate::cache::CacheError;
use crate::upstream::UpstreamError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

/// Failures that surface to the caller as a 500.
///
/// Admission rejection and snapshot misses never reach this type: the former
/// is answered by the rate-limit layer, the latter is absorbed by falling
/// through to the upstream fetch.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        // Log the two classes distinctly so cache-layer faults are never
        // mistaken for network faults.
        match &self {
            ProxyError::Upstream(e) => error!(error = %e, "upstream fetch failed"),
            ProxyError::Cache(e) => error!(error = %e, "cache interaction failed"),
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
