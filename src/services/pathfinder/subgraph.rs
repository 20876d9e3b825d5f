//! Bounded-radius subgraph extraction ("ego graph").
//!
//! Restricting a search to the neighborhood reachable within a cumulative
//! edge length keeps the per-request work proportional to the requested
//! route, not to the whole network. The structure is request-scoped and
//! never shared.

use crate::models::{Edge, Graph, VertexId};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// The subset of `graph` reachable from a root within a cumulative edge
/// length budget. Holds vertex membership only; edges are filtered lazily on
/// traversal.
pub struct Subgraph<'g> {
    graph: &'g Graph,
    members: HashSet<VertexId>,
}

impl<'g> Subgraph<'g> {
    /// Extract the neighborhood of `root` within `radius` meters of
    /// cumulative length (shortest-length distance). The root itself is
    /// always a member, even when isolated.
    pub fn within_radius(graph: &'g Graph, root: VertexId, radius: f64) -> Self {
        let mut shortest: HashMap<VertexId, f64> = HashMap::new();
        let mut heap: BinaryHeap<Reverse<(OrderedFloat, VertexId)>> = BinaryHeap::new();

        shortest.insert(root, 0.0);
        heap.push(Reverse((OrderedFloat(0.0), root)));

        while let Some(Reverse((OrderedFloat(dist), vertex))) = heap.pop() {
            if dist > *shortest.get(&vertex).unwrap_or(&f64::INFINITY) {
                continue;
            }
            for edge in graph.out_edges(vertex) {
                let next = dist + edge.length;
                if next > radius {
                    continue;
                }
                if next < *shortest.get(&edge.target).unwrap_or(&f64::INFINITY) {
                    shortest.insert(edge.target, next);
                    heap.push(Reverse((OrderedFloat(next), edge.target)));
                }
            }
        }

        Subgraph {
            graph,
            members: shortest.into_keys().collect(),
        }
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.members.contains(&vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.members.len()
    }

    /// Outgoing edges of `vertex` whose target is also a member.
    pub fn out_edges(&self, vertex: VertexId) -> impl Iterator<Item = &'g Edge> + '_ {
        self.graph
            .out_edges(vertex)
            .iter()
            .filter(move |e| self.members.contains(&e.target))
    }
}

/// Total ordering over non-NaN floats for use in the binary heap.
#[derive(PartialEq, Copy, Clone)]
pub(super) struct OrderedFloat(pub f64);

impl Eq for OrderedFloat {}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SurfaceCategory, TrailCategory};

    fn edge(id: i64, source: VertexId, target: VertexId, length: f64) -> Edge {
        Edge {
            id,
            source,
            target,
            length,
            elevation_diff: 0.0,
            surface: SurfaceCategory::Unknown,
            trail_type: TrailCategory::Unknown,
            duration: None,
        }
    }

    fn chain() -> Graph {
        // 1 -1000-> 2 -1000-> 3 -1000-> 4
        let mut builder = Graph::builder();
        builder.add_edge(edge(1, 1, 2, 1000.0));
        builder.add_edge(edge(2, 2, 3, 1000.0));
        builder.add_edge(edge(3, 3, 4, 1000.0));
        builder.build()
    }

    #[test]
    fn radius_bounds_membership() {
        let graph = chain();
        let sub = Subgraph::within_radius(&graph, 1, 2000.0);
        assert!(sub.contains(1));
        assert!(sub.contains(2));
        assert!(sub.contains(3));
        assert!(!sub.contains(4));
        assert_eq!(sub.vertex_count(), 3);
    }

    #[test]
    fn isolated_root_is_member() {
        let graph = chain();
        let sub = Subgraph::within_radius(&graph, 999, 5000.0);
        assert!(sub.contains(999));
        assert_eq!(sub.vertex_count(), 1);
    }

    #[test]
    fn membership_uses_shortest_length() {
        // Two routes to 3: direct (2500m) and via 2 (1000 + 1000 = 2000m).
        let mut builder = Graph::builder();
        builder.add_edge(edge(1, 1, 2, 1000.0));
        builder.add_edge(edge(2, 2, 3, 1000.0));
        builder.add_edge(edge(3, 1, 3, 2500.0));
        let graph = builder.build();

        let sub = Subgraph::within_radius(&graph, 1, 2000.0);
        assert!(sub.contains(3));
    }

    #[test]
    fn out_edges_filtered_to_members() {
        let graph = chain();
        let sub = Subgraph::within_radius(&graph, 1, 2000.0);
        // 3 -> 4 exists in the graph but 4 is outside the radius.
        assert_eq!(sub.out_edges(3).count(), 0);
        assert_eq!(sub.out_edges(2).count(), 1);
    }

    #[test]
    fn direction_respected() {
        let graph = chain();
        let sub = Subgraph::within_radius(&graph, 3, 5000.0);
        // Nothing upstream of 3 is reachable in a directed chain.
        assert!(!sub.contains(1));
        assert!(!sub.contains(2));
        assert!(sub.contains(4));
    }
}
