use crate::error::Result;
use crate::models::{Coordinates, VertexId};
use async_trait::async_trait;
use sqlx::PgPool;

/// Coordinate and nearest-vertex lookups against the vertex table. The
/// search itself never reads coordinates; callers use them to anchor
/// requests and to report waypoint positions.
#[async_trait]
pub trait VertexRepository: Send + Sync {
    /// WGS84 coordinates of a vertex, `None` if the vertex is unknown.
    async fn coordinates_of(&self, vertex: VertexId) -> Result<Option<Coordinates>>;

    /// The vertex closest to a point, with its distance in meters.
    async fn nearest_vertex(&self, point: &Coordinates) -> Result<Option<(VertexId, f64)>>;
}

pub struct PgVertexRepository {
    pool: PgPool,
}

impl PgVertexRepository {
    pub fn new(pool: PgPool) -> Self {
        PgVertexRepository { pool }
    }
}

#[async_trait]
impl VertexRepository for PgVertexRepository {
    async fn coordinates_of(&self, vertex: VertexId) -> Result<Option<Coordinates>> {
        let row: Option<(f64, f64)> = sqlx::query_as(
            r#"
            SELECT ST_X(ST_Transform(vertex, 4326)) AS lon,
                   ST_Y(ST_Transform(vertex, 4326)) AS lat
            FROM wanderwege_vertices_3
            WHERE vertex_id = $1
            "#,
        )
        .bind(vertex)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(lon, lat)| Coordinates { lon, lat }))
    }

    async fn nearest_vertex(&self, point: &Coordinates) -> Result<Option<(VertexId, f64)>> {
        let row: Option<(i64, f64)> = sqlx::query_as(
            r#"
            SELECT vertex_id,
                   ST_Distance(
                       vertex,
                       ST_Transform(ST_SetSRID(ST_MakePoint($1, $2), 4326), 2056)
                   ) AS dist
            FROM wanderwege_vertices_3
            ORDER BY dist ASC
            LIMIT 1
            "#,
        )
        .bind(point.lon)
        .bind(point.lat)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
