//! Graph lifecycle: build once from the edge source (snapshot-first), share
//! read-only, swap atomically on reload.

use crate::cache::GraphSnapshotStore;
use crate::db::{EdgeSource, NetworkKind};
use crate::error::{AppError, Result};
use crate::models::Graph;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Owns the in-memory graph for one network. Readers get a cheap
/// `Arc<Graph>` handle to an immutable snapshot; `load`/`reload` install a
/// new snapshot behind a single-writer lock, so no reader ever observes a
/// partially populated graph.
pub struct GraphService {
    kind: NetworkKind,
    edge_source: Arc<dyn EdgeSource>,
    snapshot_store: Arc<dyn GraphSnapshotStore>,
    graph: RwLock<Option<Arc<Graph>>>,
}

impl GraphService {
    pub fn new(
        kind: NetworkKind,
        edge_source: Arc<dyn EdgeSource>,
        snapshot_store: Arc<dyn GraphSnapshotStore>,
    ) -> Self {
        GraphService {
            kind,
            edge_source,
            snapshot_store,
            graph: RwLock::new(None),
        }
    }

    /// Current graph handle. Fails if `load` has not completed yet.
    pub async fn graph(&self) -> Result<Arc<Graph>> {
        self.graph.read().await.clone().ok_or_else(|| {
            AppError::Internal(format!(
                "{} graph requested before it was loaded",
                self.kind.as_str()
            ))
        })
    }

    pub fn is_cache_fresh(&self) -> bool {
        self.snapshot_store.is_fresh()
    }

    /// Idempotent per process lifetime: the first call populates the graph,
    /// later calls return the existing handle.
    pub async fn load(&self) -> Result<Arc<Graph>> {
        if let Some(graph) = self.graph.read().await.clone() {
            return Ok(graph);
        }

        let mut slot = self.graph.write().await;
        // Lost the race to another loader.
        if let Some(graph) = slot.clone() {
            return Ok(graph);
        }

        let graph = Arc::new(self.load_or_build().await?);
        let stats = graph.stats();
        tracing::info!(
            network = self.kind.as_str(),
            vertices = stats.vertex_count,
            edges = stats.edge_count,
            "{} graph ready: {} vertices, {} edges",
            self.kind.as_str(),
            stats.vertex_count,
            stats.edge_count
        );
        *slot = Some(graph.clone());
        Ok(graph)
    }

    /// Build a fresh graph from the edge source and swap it in atomically.
    /// Readers holding the previous handle keep a consistent snapshot.
    pub async fn reload(&self) -> Result<Arc<Graph>> {
        let graph = Arc::new(self.build_from_source().await?);
        *self.graph.write().await = Some(graph.clone());
        Ok(graph)
    }

    async fn load_or_build(&self) -> Result<Graph> {
        match self.snapshot_store.load().await {
            Ok(Some(graph)) => return Ok(graph),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    network = self.kind.as_str(),
                    error = %e,
                    "Snapshot load failed, rebuilding from source"
                );
            }
        }
        self.build_from_source().await
    }

    async fn build_from_source(&self) -> Result<Graph> {
        tracing::info!(
            network = self.kind.as_str(),
            "Building {} graph from edge source",
            self.kind.as_str()
        );
        let edges = self.edge_source.fetch_edges().await?;
        let mut builder = Graph::builder();
        for edge in edges {
            builder.add_edge(edge);
        }
        let graph = builder.build();

        // Snapshot write failure is logged, never fatal: the in-memory graph
        // stays usable.
        if let Err(e) = self.snapshot_store.save(&graph).await {
            tracing::warn!(
                network = self.kind.as_str(),
                error = %e,
                "Failed to persist graph snapshot"
            );
        }

        Ok(graph)
    }
}
