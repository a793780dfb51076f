//! Durable on-disk copy of the last successfully fetched todos document.
//!
//! The snapshot is a single pretty-printed JSON file read and written as a
//! whole document. It carries no metadata: it is simply the last value the
//! upstream fetch path persisted, independent of cache state.

use anyhow::Context;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;
use ulid::Ulid;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The file is absent, unreadable, or not valid JSON. All three are a
    /// recoverable miss, not a fault: the read path falls through to upstream.
    #[error("snapshot missing or unreadable: {0}")]
    Unavailable(String),
}

#[derive(Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot document.
    pub async fn load(&self) -> Result<Value, SnapshotError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SnapshotError::Unavailable(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| SnapshotError::Unavailable(e.to_string()))
    }

    /// Persist a document, replacing any previous snapshot.
    ///
    /// Writes to a uniquely named sibling temp file and renames it into place,
    /// so concurrent low-frequency savers cannot leave a torn file on disk
    /// (last writer wins).
    pub async fn save(&self, value: &Value) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize snapshot")?;

        let tmp = self.path.with_extension(format!("{}.tmp", Ulid::new()));
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write snapshot temp file {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to move snapshot into {}", self.path.display()))?;

        debug!(path = %self.path.display(), "snapshot persisted");
        Ok(())
    }
}
