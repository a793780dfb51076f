//! Read-through handler: volatile cache, then disk snapshot, then live fetch.

use axum::Json;
use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::state::AppState;
use crate::web::error::ProxyError;

/// Response envelope for the proxy endpoint.
///
/// `cacheFlag = true` means the response was served without contacting the
/// upstream (in-memory cache hit or snapshot fallback); `false` means a live
/// fetch happened.
#[derive(Serialize)]
struct ProxyResponse<'a> {
    data: &'a Value,
    #[serde(rename = "cacheFlag")]
    cache_flag: bool,
}

/// `GET /proxy`
///
/// Query parameters are forwarded verbatim to the upstream on a live fetch.
pub(super) async fn get_todos(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    // Fast path: live in-memory entry.
    if let Some(cached) = state.cache.get()? {
        debug!("cache hit");
        return Ok(envelope(&cached, true));
    }

    // Cache miss: try the on-disk snapshot before going to the network.
    match state.snapshot.load().await {
        Ok(snapshot) => {
            debug!("cache miss, serving snapshot");
            let value = state.cache.set(snapshot)?;
            return Ok(envelope(&value, true));
        }
        Err(e) => {
            warn!(error = %e, "snapshot unavailable, fetching from upstream");
        }
    }

    let fetched = state.upstream.fetch_todos(query.as_deref()).await?;
    let value = state.cache.set(fetched)?;

    // Persist for the next cold start. A save failure is logged, never
    // surfaced: the caller already has a good response.
    if let Err(e) = state.snapshot.save(&value).await {
        error!(
            error = %e,
            path = %state.snapshot.path().display(),
            "failed to persist snapshot"
        );
    }

    info!("served live upstream fetch");
    Ok(envelope(&value, false))
}

fn envelope(data: &Value, cache_flag: bool) -> Response {
    Json(ProxyResponse { data, cache_flag }).into_response()
}
