// Library exports for testing and reusability

pub mod cache;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use cache::FileSnapshotStore;
use config::Config;
use db::{NetworkKind, PgEdgeSource};
use services::GraphService;
use sqlx::PgPool;
use std::sync::Arc;

pub use cache::GraphSnapshotStore;

// App state for sharing across the application
pub struct AppState {
    pub db_pool: PgPool,
    pub trail_graph: Arc<GraphService>,
    pub street_graph: Arc<GraphService>,
}

impl AppState {
    /// Wire up both network graphs against one connection pool. Graphs are
    /// not loaded yet; call [`GraphService::load`] on each before serving
    /// traffic.
    pub fn new(db_pool: PgPool, config: &Config) -> Self {
        let trail_graph = Arc::new(GraphService::new(
            NetworkKind::Trail,
            Arc::new(PgEdgeSource::new(db_pool.clone(), NetworkKind::Trail)),
            Arc::new(FileSnapshotStore::new(
                config.trail_snapshot_path.clone(),
                config.snapshot_max_age,
            )),
        ));
        let street_graph = Arc::new(GraphService::new(
            NetworkKind::Street,
            Arc::new(PgEdgeSource::new(db_pool.clone(), NetworkKind::Street)),
            Arc::new(FileSnapshotStore::new(
                config.street_snapshot_path.clone(),
                config.snapshot_max_age,
            )),
        ));

        AppState {
            db_pool,
            trail_graph,
            street_graph,
        }
    }
}
