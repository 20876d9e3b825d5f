use crate::models::{Coordinates, Graph, PoiCategory, VertexId};
use serde::{Deserialize, Serialize};

/// An ordered sequence of vertices with no repeats. Transient result object,
/// owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Path(pub Vec<VertexId>);

impl Path {
    pub fn vertices(&self) -> &[VertexId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn start(&self) -> Option<VertexId> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<VertexId> {
        self.0.last().copied()
    }

    /// Sum of traversed edge lengths. `None` if any consecutive pair is not
    /// connected in `graph`.
    pub fn total_length(&self, graph: &Graph) -> Option<f64> {
        self.0
            .windows(2)
            .map(|pair| graph.edge_between(pair[0], pair[1]).map(|e| e.length))
            .sum()
    }

    /// Splice a continuation onto this path. A non-empty continuation must
    /// start at this path's end vertex; the join vertex is kept exactly
    /// once. An empty continuation leaves the path unchanged.
    pub fn join(mut self, continuation: &Path) -> Path {
        if let Some(rest) = continuation.0.get(1..) {
            debug_assert_eq!(self.end(), continuation.start());
            self.0.extend_from_slice(rest);
        }
        self
    }
}

/// Outcome of an exploration or point-to-point search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub end_vertex: VertexId,
    /// Physical length of the path in meters.
    pub total_length: f64,
    /// Accumulated cost under the request's preference set.
    pub total_cost: f64,
    pub path: Path,
}

/// Outcome of a round-trip route through a waypoint near a POI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BounceRoute {
    pub total_length: f64,
    pub path: Path,
    pub outbound_length: f64,
    pub return_length: f64,
    pub bounce_vertex: VertexId,
    pub bounce_coordinates: Coordinates,
    /// Which POI preference drove waypoint selection, if any.
    pub bounce_poi_category: Option<PoiCategory>,
}

/// A ranked waypoint candidate produced by the waypoint provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointCandidate {
    pub vertex_id: VertexId,
    /// Distance (meters) from the vertex to its anchoring POI, when known.
    pub poi_distance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, SurfaceCategory, TrailCategory};

    fn line_graph() -> Graph {
        let mut builder = Graph::builder();
        for (id, source, target, length) in [(1, 1, 2, 1000.0), (2, 2, 3, 500.0)] {
            builder.add_edge(Edge {
                id,
                source,
                target,
                length,
                elevation_diff: 0.0,
                surface: SurfaceCategory::Unknown,
                trail_type: TrailCategory::Unknown,
                duration: None,
            });
        }
        builder.build()
    }

    #[test]
    fn total_length_sums_edges() {
        let graph = line_graph();
        let path = Path(vec![1, 2, 3]);
        assert_eq!(path.total_length(&graph), Some(1500.0));
    }

    #[test]
    fn total_length_fails_on_missing_edge() {
        let graph = line_graph();
        let path = Path(vec![1, 3]);
        assert_eq!(path.total_length(&graph), None);
    }

    #[test]
    fn join_with_empty_continuation_is_identity() {
        let path = Path(vec![1, 2, 3]);
        let combined = path.clone().join(&Path::default());
        assert_eq!(combined, path);
    }

    #[test]
    fn join_keeps_waypoint_once() {
        let outbound = Path(vec![1, 2, 3]);
        let inbound = Path(vec![3, 4, 5]);
        let combined = outbound.join(&inbound);
        assert_eq!(combined.vertices(), &[1, 2, 3, 4, 5]);
        assert_eq!(
            combined.vertices().iter().filter(|&&v| v == 3).count(),
            1
        );
    }
}
