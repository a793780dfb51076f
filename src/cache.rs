//! Single-slot TTL cache for the proxied todos document.
//!
//! The proxy manages exactly one logical resource, so the cache holds at most
//! one entry. An expired entry is logically absent. All operations complete
//! without I/O and never hold the lock across an await point.

use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Unexpected fault while reading or writing the volatile cache.
///
/// Kept separate from upstream errors so operators can tell cache-layer
/// faults apart from network faults in the logs.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache lock poisoned by a panicked writer")]
    Poisoned,
}

struct CacheSlot {
    value: Arc<Value>,
    expires_at: Instant,
}

/// In-memory cache holding the last served todos document.
#[derive(Clone)]
pub struct TodoCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    ttl: Duration,
    slot: Mutex<Option<CacheSlot>>,
}

impl TodoCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                ttl,
                slot: Mutex::new(None),
            }),
        }
    }

    /// Return the cached document if the entry exists and is fresh.
    pub fn get(&self) -> Result<Option<Arc<Value>>, CacheError> {
        let slot = self.inner.slot.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(slot
            .as_ref()
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone()))
    }

    /// Store a document, resetting the TTL to the configured duration from now.
    ///
    /// Returns the stored value so callers can serve it without re-reading.
    pub fn set(&self, value: Value) -> Result<Arc<Value>, CacheError> {
        let value = Arc::new(value);
        let mut slot = self.inner.slot.lock().map_err(|_| CacheError::Poisoned)?;
        *slot = Some(CacheSlot {
            value: value.clone(),
            expires_at: Instant::now() + self.inner.ttl,
        });
        Ok(value)
    }

    /// Non-erroring probe used by the admission bypass: is a fresh entry present?
    ///
    /// A poisoned lock reads as "no live entry" so the admission path keeps
    /// counting instead of propagating a cache fault.
    pub fn has_live(&self) -> bool {
        self.inner
            .slot
            .lock()
            .map(|slot| {
                slot.as_ref()
                    .is_some_and(|entry| entry.expires_at > Instant::now())
            })
            .unwrap_or(false)
    }
}
