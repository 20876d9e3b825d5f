use crate::constants::WAYPOINT_DISTANCE_FLEX;
use crate::error::Result;
use crate::models::{PoiPreferences, VertexId, WaypointCandidate};
use async_trait::async_trait;
use sqlx::PgPool;

/// Default cap on waypoint-to-POI distance (meters) when the request leaves
/// it unspecified.
const DEFAULT_MAX_POI_DISTANCE_M: f64 = 500.0;

/// A lazily-consumed, non-restartable stream of waypoint candidates, ordered
/// best-first. Restarting means re-issuing the underlying query.
#[async_trait]
pub trait WaypointProvider: Send {
    /// Next candidate, or `None` once the sequence is exhausted.
    async fn next_candidate(&mut self) -> Result<Option<WaypointCandidate>>;
}

#[derive(sqlx::FromRow)]
struct CandidateRow {
    vertex_id: i64,
    poi_distance: Option<f64>,
}

/// Postgres-backed waypoint provider. One ranked query is issued on the
/// first poll and drained candidate by candidate, so the bounce retry loop
/// walks down the ranking instead of re-fetching the same top hit.
pub struct PgWaypointProvider {
    pool: PgPool,
    start_vertex: VertexId,
    target_distance: f64,
    poi_preferences: PoiPreferences,
    fetched: Option<std::vec::IntoIter<WaypointCandidate>>,
}

impl PgWaypointProvider {
    pub fn new(
        pool: PgPool,
        start_vertex: VertexId,
        target_distance: f64,
        poi_preferences: PoiPreferences,
    ) -> Self {
        PgWaypointProvider {
            pool,
            start_vertex,
            target_distance,
            poi_preferences,
            fetched: None,
        }
    }

    /// Candidates near the target outbound distance and close to the
    /// requested POI category, ranked by the combined normalized score of
    /// (POI distance, deviation from target distance).
    async fn fetch_ranked(&self) -> Result<Vec<WaypointCandidate>> {
        let poi_type = match self.poi_preferences.driving_category() {
            Some(category) => category.to_string(),
            None => {
                tracing::debug!(
                    start = self.start_vertex,
                    "No POI preference set, selecting waypoints by distance only"
                );
                return self.fetch_ranked_by_distance().await;
            }
        };
        let max_poi_distance = self
            .poi_preferences
            .max_poi_distance
            .unwrap_or(DEFAULT_MAX_POI_DISTANCE_M);

        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT v.vertex_id, p.poi_distance
            FROM wanderwege_vertices_3 v
            JOIN vertex_has_poi p ON v.vertex_id = p.vertex_id
            WHERE p.poi_type = $1
              AND p.poi_distance <= $2
              AND ST_DWithin(
                  v.vertex,
                  (SELECT vertex FROM wanderwege_vertices_3 WHERE vertex_id = $3),
                  $4
              )
            ORDER BY
                (p.poi_distance / $2) +
                (ABS(ST_Distance(
                    v.vertex,
                    (SELECT vertex FROM wanderwege_vertices_3 WHERE vertex_id = $3)
                ) - $5) / $5) ASC
            "#,
        )
        .bind(&poi_type)
        .bind(max_poi_distance)
        .bind(self.start_vertex)
        .bind(self.target_distance * WAYPOINT_DISTANCE_FLEX)
        .bind(self.target_distance)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| WaypointCandidate {
                vertex_id: r.vertex_id,
                poi_distance: r.poi_distance,
            })
            .collect())
    }

    /// Fallback ranking when no POI category is requested: vertices closest
    /// to the target outbound distance.
    async fn fetch_ranked_by_distance(&self) -> Result<Vec<WaypointCandidate>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT v.vertex_id, NULL::double precision AS poi_distance
            FROM wanderwege_vertices_3 v
            WHERE ST_DWithin(
                v.vertex,
                (SELECT vertex FROM wanderwege_vertices_3 WHERE vertex_id = $1),
                $2
            )
            ORDER BY ABS(ST_Distance(
                v.vertex,
                (SELECT vertex FROM wanderwege_vertices_3 WHERE vertex_id = $1)
            ) - $3) ASC
            LIMIT 50
            "#,
        )
        .bind(self.start_vertex)
        .bind(self.target_distance * WAYPOINT_DISTANCE_FLEX)
        .bind(self.target_distance)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| WaypointCandidate {
                vertex_id: r.vertex_id,
                poi_distance: r.poi_distance,
            })
            .collect())
    }
}

#[async_trait]
impl WaypointProvider for PgWaypointProvider {
    async fn next_candidate(&mut self) -> Result<Option<WaypointCandidate>> {
        if self.fetched.is_none() {
            let candidates = self.fetch_ranked().await?;
            tracing::debug!(
                start = self.start_vertex,
                target_distance_m = self.target_distance,
                candidates = candidates.len(),
                "Fetched ranked waypoint candidates"
            );
            self.fetched = Some(candidates.into_iter());
        }
        Ok(self.fetched.as_mut().and_then(Iterator::next))
    }
}

/// In-memory provider over a fixed candidate list. Used by tests and by
/// callers that precompute candidates.
pub struct StaticWaypointProvider {
    candidates: std::vec::IntoIter<WaypointCandidate>,
}

impl StaticWaypointProvider {
    pub fn new(candidates: Vec<WaypointCandidate>) -> Self {
        StaticWaypointProvider {
            candidates: candidates.into_iter(),
        }
    }
}

#[async_trait]
impl WaypointProvider for StaticWaypointProvider {
    async fn next_candidate(&mut self) -> Result<Option<WaypointCandidate>> {
        Ok(self.candidates.next())
    }
}
