use async_trait::async_trait;
use std::collections::HashMap;
use trailroute::models::{
    Coordinates, Edge, Graph, SurfaceCategory, TrailCategory, VertexId,
};
use trailroute::Result;

/// Initialize tracing once for the test binary; repeated calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("trailroute=debug"))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

pub fn edge(
    id: i64,
    source: VertexId,
    target: VertexId,
    length: f64,
    elevation_diff: f64,
) -> Edge {
    Edge {
        id,
        source,
        target,
        length,
        elevation_diff,
        surface: SurfaceCategory::Unknown,
        trail_type: TrailCategory::Unknown,
        duration: None,
    }
}

pub fn graph_of(edges: Vec<Edge>) -> Graph {
    let mut builder = Graph::builder();
    for e in edges {
        builder.add_edge(e);
    }
    builder.build()
}

/// Three vertices in a line: A(1) -> B(2) -> C(3), 1000m per edge, +50m then
/// -50m of elevation. The fixture from the route engine's acceptance
/// scenarios.
pub fn abc_graph() -> Graph {
    graph_of(vec![edge(1, 1, 2, 1000.0, 50.0), edge(2, 2, 3, 1000.0, -50.0)])
}

/// Coordinate lookup over a fixed vertex map.
pub struct StaticVertexRepository {
    coordinates: HashMap<VertexId, Coordinates>,
}

impl StaticVertexRepository {
    pub fn new(entries: impl IntoIterator<Item = (VertexId, Coordinates)>) -> Self {
        StaticVertexRepository {
            coordinates: entries.into_iter().collect(),
        }
    }
}

#[async_trait]
impl trailroute::db::VertexRepository for StaticVertexRepository {
    async fn coordinates_of(&self, vertex: VertexId) -> Result<Option<Coordinates>> {
        Ok(self.coordinates.get(&vertex).copied())
    }

    async fn nearest_vertex(&self, point: &Coordinates) -> Result<Option<(VertexId, f64)>> {
        Ok(self
            .coordinates
            .iter()
            .map(|(v, c)| (*v, point.distance_to(c)))
            .min_by(|a, b| a.1.total_cmp(&b.1)))
    }
}
