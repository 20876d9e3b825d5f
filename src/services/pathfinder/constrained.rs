//! Length-constrained exploration: find the cheapest path whose physical
//! length lands inside a tolerance band around a desired length.

use super::cost::edge_cost;
use super::dijkstra::min_cost_from;
use super::subgraph::Subgraph;
use crate::error::{AppError, Result};
use crate::models::{Graph, PreferenceSet, SearchResult, VertexId};
use std::collections::HashSet;

/// Search from `start` for the minimum-cost path whose length lies in
/// `[desired * (1 - tolerance), desired * (1 + tolerance)]`.
///
/// The graph is first restricted to the neighborhood reachable within the
/// band's upper bound; only nearby vertices can satisfy the length ceiling,
/// so searching further is wasted work. Ties on cost are resolved toward the
/// lowest vertex id.
pub fn constrained_length_search(
    graph: &Graph,
    start: VertexId,
    desired_length: f64,
    tolerance: f64,
    prefs: &PreferenceSet,
    avoid: Option<&HashSet<VertexId>>,
) -> Result<SearchResult> {
    let min_length = desired_length * (1.0 - tolerance);
    let max_length = desired_length * (1.0 + tolerance);

    let subgraph = Subgraph::within_radius(graph, start, max_length);
    tracing::debug!(
        start = start,
        vertices = subgraph.vertex_count(),
        max_length_m = max_length,
        "Restricted exploration to bounded-radius subgraph"
    );

    let paths = min_cost_from(
        &subgraph,
        start,
        |edge| edge_cost(edge, prefs, avoid),
        Some(max_length),
    );

    // Among vertices whose cheapest path lands in the band, keep the one
    // with minimum cost; lowest vertex id on equal cost.
    let mut best: Option<(VertexId, f64, f64)> = None;
    for (vertex, node) in paths.settled() {
        if node.length < min_length || node.length > max_length {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_vertex, best_cost, _)) => {
                node.cost < best_cost || (node.cost == best_cost && vertex < best_vertex)
            }
        };
        if better {
            best = Some((vertex, node.cost, node.length));
        }
    }

    let (end_vertex, total_cost, total_length) = best.ok_or_else(|| {
        AppError::NotFound(format!(
            "No paths found within length range {:.0}-{:.0}m of vertex {}",
            min_length, max_length, start
        ))
    })?;

    let path = paths
        .path_to(end_vertex)
        .ok_or_else(|| AppError::Internal(format!("Missing path to settled vertex {}", end_vertex)))?;

    tracing::debug!(
        end_vertex = end_vertex,
        total_length_m = total_length,
        total_cost = total_cost,
        "Exploration found length-admissible path"
    );

    Ok(SearchResult {
        end_vertex,
        total_length,
        total_cost,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, SurfaceCategory, TrailCategory};

    fn edge(id: i64, source: VertexId, target: VertexId, length: f64, elevation: f64) -> Edge {
        Edge {
            id,
            source,
            target,
            length,
            elevation_diff: elevation,
            surface: SurfaceCategory::Unknown,
            trail_type: TrailCategory::Unknown,
            duration: None,
        }
    }

    #[test]
    fn result_length_is_inside_band() {
        let mut builder = Graph::builder();
        builder.add_edge(edge(1, 1, 2, 1000.0, 0.0));
        builder.add_edge(edge(2, 2, 3, 1000.0, 0.0));
        builder.add_edge(edge(3, 3, 4, 1000.0, 0.0));
        let graph = builder.build();

        let result =
            constrained_length_search(&graph, 1, 2000.0, 0.1, &PreferenceSet::default(), None)
                .unwrap();
        assert!(result.total_length >= 1800.0 && result.total_length <= 2200.0);
        assert_eq!(result.end_vertex, 3);
    }

    #[test]
    fn prefers_cheaper_admissible_endpoint() {
        // Two admissible endpoints at ~2000m: via an uphill branch and via a
        // downhill branch. With gain mode the uphill branch must win.
        let mut builder = Graph::builder();
        builder.add_edge(edge(1, 1, 2, 1000.0, 40.0));
        builder.add_edge(edge(2, 2, 3, 1000.0, 40.0));
        builder.add_edge(edge(3, 1, 4, 1000.0, -40.0));
        builder.add_edge(edge(4, 4, 5, 1000.0, -40.0));
        let graph = builder.build();

        let prefs = PreferenceSet {
            elevation_mode: crate::models::ElevationMode::Gain,
            ..Default::default()
        };
        let result = constrained_length_search(&graph, 1, 2000.0, 0.1, &prefs, None).unwrap();
        assert_eq!(result.end_vertex, 3);
        assert_eq!(result.path.vertices(), &[1, 2, 3]);
    }

    #[test]
    fn equal_cost_breaks_tie_to_lowest_vertex_id() {
        let mut builder = Graph::builder();
        builder.add_edge(edge(1, 1, 20, 2000.0, 0.0));
        builder.add_edge(edge(2, 1, 10, 2000.0, 0.0));
        let graph = builder.build();

        let result =
            constrained_length_search(&graph, 1, 2000.0, 0.1, &PreferenceSet::default(), None)
                .unwrap();
        assert_eq!(result.end_vertex, 10);
    }

    #[test]
    fn unreachable_band_is_not_found() {
        let mut builder = Graph::builder();
        builder.add_edge(edge(1, 1, 2, 1000.0, 0.0));
        builder.add_edge(edge(2, 2, 3, 1000.0, 0.0));
        let graph = builder.build();

        let err =
            constrained_length_search(&graph, 1, 100_000.0, 0.1, &PreferenceSet::default(), None)
                .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn avoid_set_steers_away_from_penalized_branch() {
        // Symmetric fork; penalizing one branch must flip the choice.
        let mut builder = Graph::builder();
        builder.add_edge(edge(1, 1, 2, 1000.0, 0.0));
        builder.add_edge(edge(2, 2, 3, 1000.0, 0.0));
        builder.add_edge(edge(3, 1, 4, 1000.0, 0.0));
        builder.add_edge(edge(4, 4, 5, 1000.0, 0.0));
        let graph = builder.build();

        let avoid: HashSet<VertexId> = [2].into_iter().collect();
        let result =
            constrained_length_search(&graph, 1, 2000.0, 0.1, &PreferenceSet::default(), Some(&avoid))
                .unwrap();
        assert_eq!(result.path.vertices(), &[1, 4, 5]);
    }
}
