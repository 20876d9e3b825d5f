//! Minimum-cost path between two vertices within a bounded search radius.

use super::cost::edge_cost;
use super::dijkstra::min_cost_from;
use super::subgraph::Subgraph;
use crate::error::{AppError, Result};
use crate::models::{Graph, PreferenceSet, SearchResult, VertexId};

/// Find the minimum-cost path from `start` to `target`, considering only the
/// neighborhood of `start` within `search_radius` meters of cumulative
/// length. Never returns a partial path: unreachable targets (outside the
/// radius, or in a disconnected component inside it) are `NotFound`.
pub fn point_to_point_search(
    graph: &Graph,
    start: VertexId,
    target: VertexId,
    prefs: &PreferenceSet,
    search_radius: f64,
) -> Result<SearchResult> {
    let subgraph = Subgraph::within_radius(graph, start, search_radius);

    if !subgraph.contains(target) {
        return Err(AppError::NotFound(format!(
            "Target vertex {} not found within {:.0}m of vertex {}",
            target, search_radius, start
        )));
    }

    let paths = min_cost_from(&subgraph, start, |edge| edge_cost(edge, prefs, None), None);

    let node = paths.node(target).ok_or_else(|| {
        AppError::NotFound(format!(
            "No path found between vertices {} and {}",
            start, target
        ))
    })?;
    let (total_cost, total_length) = (node.cost, node.length);

    let path = paths
        .path_to(target)
        .ok_or_else(|| AppError::Internal(format!("Missing path to settled vertex {}", target)))?;

    Ok(SearchResult {
        end_vertex: target,
        total_length,
        total_cost,
        path,
    })
}
