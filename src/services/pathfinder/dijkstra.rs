//! Single-source minimum-cost search over a bounded subgraph.
//!
//! The frontier tracks two distinct quantities per vertex: accumulated cost
//! (the priority the search minimizes) and accumulated physical length (the
//! admissibility dimension for cutoffs and length-band filtering). The two
//! are never conflated into one scalar.

use super::subgraph::{OrderedFloat, Subgraph};
use crate::models::{Edge, Path, VertexId};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Cost and physical length of the settled path to one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    pub cost: f64,
    pub length: f64,
}

/// Settled shortest-by-cost paths from one source vertex.
pub struct SingleSource {
    source: VertexId,
    nodes: HashMap<VertexId, PathNode>,
    predecessor: HashMap<VertexId, VertexId>,
}

impl SingleSource {
    pub fn node(&self, vertex: VertexId) -> Option<&PathNode> {
        self.nodes.get(&vertex)
    }

    /// All settled vertices with their cost/length, source included.
    pub fn settled(&self) -> impl Iterator<Item = (VertexId, &PathNode)> {
        self.nodes.iter().map(|(v, n)| (*v, n))
    }

    /// Reconstruct the settled path to `vertex` by walking predecessors.
    pub fn path_to(&self, vertex: VertexId) -> Option<Path> {
        if !self.nodes.contains_key(&vertex) {
            return None;
        }
        let mut vertices = vec![vertex];
        let mut current = vertex;
        while current != self.source {
            current = *self.predecessor.get(&current)?;
            vertices.push(current);
        }
        vertices.reverse();
        Some(Path(vertices))
    }
}

/// Run Dijkstra from `start` over `subgraph`, using `cost_of` as the edge
/// weight. Relaxations whose cumulative *length* would exceed
/// `length_cutoff` are not taken; the cost dimension has no cutoff.
///
/// Ties on cost keep the path with the lower accumulated length; the heap
/// additionally orders equal (cost, length) entries by vertex id, so results
/// are deterministic for a given graph.
pub fn min_cost_from<F>(
    subgraph: &Subgraph<'_>,
    start: VertexId,
    cost_of: F,
    length_cutoff: Option<f64>,
) -> SingleSource
where
    F: Fn(&Edge) -> f64,
{
    let mut nodes: HashMap<VertexId, PathNode> = HashMap::new();
    let mut predecessor: HashMap<VertexId, VertexId> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(OrderedFloat, OrderedFloat, VertexId)>> = BinaryHeap::new();

    nodes.insert(
        start,
        PathNode {
            cost: 0.0,
            length: 0.0,
        },
    );
    heap.push(Reverse((OrderedFloat(0.0), OrderedFloat(0.0), start)));

    while let Some(Reverse((OrderedFloat(cost), OrderedFloat(length), vertex))) = heap.pop() {
        // Stale heap entry: a cheaper path to this vertex was settled already.
        match nodes.get(&vertex) {
            Some(node) if cost > node.cost => continue,
            _ => {}
        }

        for edge in subgraph.out_edges(vertex) {
            let next_length = length + edge.length;
            if let Some(cutoff) = length_cutoff {
                if next_length > cutoff {
                    continue;
                }
            }
            let next_cost = cost + cost_of(edge);
            // Equal-cost paths prefer the shorter one.
            let improves = match nodes.get(&edge.target) {
                None => true,
                Some(node) => {
                    next_cost < node.cost || (next_cost == node.cost && next_length < node.length)
                }
            };
            if improves {
                nodes.insert(
                    edge.target,
                    PathNode {
                        cost: next_cost,
                        length: next_length,
                    },
                );
                predecessor.insert(edge.target, vertex);
                heap.push(Reverse((
                    OrderedFloat(next_cost),
                    OrderedFloat(next_length),
                    edge.target,
                )));
            }
        }
    }

    SingleSource {
        source: start,
        nodes,
        predecessor,
    }
}
