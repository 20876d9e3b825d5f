use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

mod edge_source;
mod vertex_repository;
mod waypoint_repository;

pub use edge_source::{EdgeSource, NetworkKind, PgEdgeSource};
pub use vertex_repository::{PgVertexRepository, VertexRepository};
pub use waypoint_repository::{PgWaypointProvider, StaticWaypointProvider, WaypointProvider};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
