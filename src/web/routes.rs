//! Router construction and ambient layers.

use axum::{Router, routing::get};
use std::time::Duration;

use crate::state::AppState;
use crate::web::middleware::rate_limit::RateLimitLayer;
use crate::web::middleware::request_id::RequestIdLayer;
use crate::web::{proxy, status};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer};

/// Creates the web server router.
///
/// Only the read-through endpoint is admission-gated; health/status stay
/// reachable when a client has exhausted its quota.
pub fn create_router(app_state: AppState) -> Router {
    let proxy_router = Router::new()
        .route("/proxy", get(proxy::get_todos))
        .route_layer(RateLimitLayer::new(
            app_state.admission.clone(),
            app_state.cache.clone(),
        ))
        .with_state(app_state);

    let router = Router::new()
        .route("/health", get(status::health))
        .route("/status", get(status::status))
        .merge(proxy_router);

    router.layer((
        // Outermost: per-request ID span + severity-proportional response logging.
        RequestIdLayer,
        CompressionLayer::new()
            .zstd(true)
            .br(true)
            .gzip(true)
            .quality(tower_http::CompressionLevel::Fastest),
        TimeoutLayer::new(Duration::from_secs(60)),
    ))
}
