//! On-disk graph snapshot persistence.
//!
//! A graph build is a bulk read of the whole edge table; the snapshot lets
//! subsequent process starts skip it. Snapshot problems are never fatal as
//! long as a rebuild path exists.

use crate::error::{AppError, Result};
use crate::models::Graph;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Persistence contract for graph snapshots. `save` failures are reported
/// but callers must treat them as non-fatal.
#[async_trait]
pub trait GraphSnapshotStore: Send + Sync {
    /// The persisted graph, `None` when no snapshot exists or it cannot be
    /// decoded.
    async fn load(&self) -> Result<Option<Graph>>;

    async fn save(&self, graph: &Graph) -> Result<()>;

    /// Whether a snapshot exists and is younger than the freshness window.
    fn is_fresh(&self) -> bool;
}

/// JSON file snapshot with an mtime-based freshness window.
pub struct FileSnapshotStore {
    path: PathBuf,
    max_age: Duration,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>, max_age: Duration) -> Self {
        FileSnapshotStore {
            path: path.into(),
            max_age,
        }
    }
}

#[async_trait]
impl GraphSnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<Graph>> {
        if !self.is_fresh() {
            return Ok(None);
        }
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read graph snapshot, will rebuild"
                );
                return Ok(None);
            }
        };
        match serde_json::from_slice::<Graph>(&bytes) {
            Ok(graph) => {
                tracing::info!(
                    path = %self.path.display(),
                    "Loaded graph from snapshot"
                );
                Ok(Some(graph))
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corrupt graph snapshot, will rebuild"
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, graph: &Graph) -> Result<()> {
        let bytes = serde_json::to_vec(graph)
            .map_err(|e| AppError::Snapshot(format!("Failed to encode graph: {}", e)))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| AppError::Snapshot(format!("Failed to write snapshot: {}", e)))?;
        tracing::info!(path = %self.path.display(), "Saved graph snapshot");
        Ok(())
    }

    fn is_fresh(&self) -> bool {
        let Ok(metadata) = std::fs::metadata(&self.path) else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };
        match SystemTime::now().duration_since(modified) {
            Ok(age) => age < self.max_age,
            // Clock skew put the mtime in the future; treat as fresh.
            Err(_) => true,
        }
    }
}
