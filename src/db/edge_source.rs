use crate::error::Result;
use crate::models::{Edge, SurfaceCategory, TrailCategory};
use async_trait::async_trait;
use sqlx::PgPool;

/// Which network a graph instance is built from. The two networks share one
/// loading pipeline but read different schemas and snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    Trail,
    Street,
}

impl NetworkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Trail => "trail",
            NetworkKind::Street => "street",
        }
    }
}

/// Bulk enumeration of graph edges, queried once per graph build.
#[async_trait]
pub trait EdgeSource: Send + Sync {
    async fn fetch_edges(&self) -> Result<Vec<Edge>>;
}

/// Raw trail edge row before category parsing.
#[derive(sqlx::FromRow)]
struct TrailEdgeRow {
    id: i64,
    source: i64,
    target: i64,
    length: f64,
    elevation_difference: Option<f64>,
    belagsart: Option<String>,
    wanderwege: Option<String>,
    tobler_duration: Option<f64>,
}

impl From<TrailEdgeRow> for Edge {
    fn from(row: TrailEdgeRow) -> Self {
        Edge {
            id: row.id,
            source: row.source,
            target: row.target,
            length: row.length,
            elevation_diff: row.elevation_difference.unwrap_or(0.0),
            surface: SurfaceCategory::from_source_code(row.belagsart.as_deref()),
            trail_type: TrailCategory::from_source_code(row.wanderwege.as_deref()),
            duration: row.tobler_duration,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StreetEdgeRow {
    id: i64,
    source: i64,
    target: i64,
    length: f64,
}

impl From<StreetEdgeRow> for Edge {
    fn from(row: StreetEdgeRow) -> Self {
        Edge {
            id: row.id,
            source: row.source,
            target: row.target,
            length: row.length,
            elevation_diff: 0.0,
            surface: SurfaceCategory::Unknown,
            trail_type: TrailCategory::Unknown,
            duration: None,
        }
    }
}

/// Postgres-backed edge source for either network.
pub struct PgEdgeSource {
    pool: PgPool,
    kind: NetworkKind,
}

impl PgEdgeSource {
    pub fn new(pool: PgPool, kind: NetworkKind) -> Self {
        PgEdgeSource { pool, kind }
    }
}

#[async_trait]
impl EdgeSource for PgEdgeSource {
    async fn fetch_edges(&self) -> Result<Vec<Edge>> {
        let edges: Vec<Edge> = match self.kind {
            NetworkKind::Trail => {
                let rows = sqlx::query_as::<_, TrailEdgeRow>(
                    r#"
                    SELECT id, source, target, length, elevation_difference,
                           belagsart, wanderwege, tobler_duration
                    FROM wanderwege_edges_3
                    "#,
                )
                .fetch_all(&self.pool)
                .await?;
                rows.into_iter().map(Edge::from).collect()
            }
            NetworkKind::Street => {
                // Street edges are already bidirectional in the source; rows
                // with broken geometry or zero length are excluded up front.
                let rows = sqlx::query_as::<_, StreetEdgeRow>(
                    r#"
                    SELECT id, source, target, length
                    FROM strasse_clear_edges_2
                    WHERE length > 0 AND ST_IsValid(geom)
                    "#,
                )
                .fetch_all(&self.pool)
                .await?;
                rows.into_iter().map(Edge::from).collect()
            }
        };

        tracing::info!(
            network = self.kind.as_str(),
            edges = edges.len(),
            "Fetched {} edges from the {} network",
            edges.len(),
            self.kind.as_str()
        );
        Ok(edges)
    }
}
