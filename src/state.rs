//! Application state shared across request handlers.
//!
//! Each component is explicitly owned and cheaply clonable, so tests can
//! construct isolated instances instead of reaching for process globals.

use crate::cache::TodoCache;
use crate::config::Config;
use crate::snapshot::SnapshotStore;
use crate::upstream::UpstreamApi;
use crate::web::middleware::rate_limit::AdmissionController;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub cache: TodoCache,
    pub snapshot: SnapshotStore,
    pub upstream: Arc<UpstreamApi>,
    pub admission: AdmissionController,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            cache: TodoCache::new(config.cache_ttl()),
            snapshot: SnapshotStore::new(config.snapshot_path.clone()),
            upstream: Arc::new(UpstreamApi::new(config.api_url.clone())),
            admission: AdmissionController::new(config.rate_window(), config.rate_limit_max),
        }
    }
}
