use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub type VertexId = i64;

/// Surface classification of a trail segment, parsed from the source data's
/// German category codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceCategory {
    Hard,
    Natural,
    #[default]
    Unknown,
}

impl SurfaceCategory {
    /// Map a raw source code to a category. Anything unrecognized (including
    /// NULL, surfaced here as `None`) is `Unknown`, not an error.
    pub fn from_source_code(code: Option<&str>) -> Self {
        match code {
            Some("Hart") => SurfaceCategory::Hard,
            Some("Natur") => SurfaceCategory::Natural,
            _ => SurfaceCategory::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrailCategory {
    Alpine,
    Mountain,
    Hiking,
    #[default]
    Unknown,
    Other,
}

impl TrailCategory {
    pub fn from_source_code(code: Option<&str>) -> Self {
        match code {
            Some("Alpinwanderweg") => TrailCategory::Alpine,
            Some("Bergwanderweg") => TrailCategory::Mountain,
            Some("Wanderweg") => TrailCategory::Hiking,
            None => TrailCategory::Unknown,
            Some(_) => TrailCategory::Other,
        }
    }
}

impl fmt::Display for TrailCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailCategory::Alpine => write!(f, "alpine"),
            TrailCategory::Mountain => write!(f, "mountain"),
            TrailCategory::Hiking => write!(f, "hiking"),
            TrailCategory::Unknown => write!(f, "unknown"),
            TrailCategory::Other => write!(f, "other"),
        }
    }
}

impl FromStr for TrailCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alpine" => Ok(TrailCategory::Alpine),
            "mountain" => Ok(TrailCategory::Mountain),
            "hiking" => Ok(TrailCategory::Hiking),
            "unknown" => Ok(TrailCategory::Unknown),
            "other" => Ok(TrailCategory::Other),
            _ => Err(format!("Invalid trail category: '{}'", s)),
        }
    }
}

/// A directed traversable segment between two vertices. Immutable once the
/// graph is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub id: i64,
    pub source: VertexId,
    pub target: VertexId,
    /// Physical length in meters, always positive.
    pub length: f64,
    /// Elevation change source -> target in meters, signed.
    pub elevation_diff: f64,
    pub surface: SurfaceCategory,
    pub trail_type: TrailCategory,
    /// Estimated traversal time in minutes. Informational only, never used
    /// by the search.
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
}

/// The trail (or street) network: a directed weighted graph, read-only after
/// construction. Disconnected components are expected, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    adjacency: HashMap<VertexId, Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    /// Outgoing edges of a vertex. Empty for sinks and unknown vertices.
    pub fn out_edges(&self, vertex: VertexId) -> &[Edge] {
        self.adjacency
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The directed edge from `source` to `target`, if one exists. With
    /// parallel edges, the first loaded wins.
    pub fn edge_between(&self, source: VertexId, target: VertexId) -> Option<&Edge> {
        self.out_edges(source).iter().find(|e| e.target == target)
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertex_count: self.adjacency.len(),
            edge_count: self.edge_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Accumulates edges into a [`Graph`]. Both endpoints of every edge are
/// registered as vertices, so the endpoints-exist invariant holds by
/// construction.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: HashMap<VertexId, Vec<Edge>>,
    edge_count: usize,
    skipped: usize,
}

impl GraphBuilder {
    /// Add a directed edge. Edges with non-positive length are skipped and
    /// counted, matching how the street network source is filtered.
    pub fn add_edge(&mut self, edge: Edge) -> &mut Self {
        if edge.length <= 0.0 {
            self.skipped += 1;
            return self;
        }
        self.adjacency.entry(edge.target).or_default();
        self.adjacency.entry(edge.source).or_default().push(edge);
        self.edge_count += 1;
        self
    }

    pub fn build(self) -> Graph {
        if self.skipped > 0 {
            tracing::warn!(
                skipped = self.skipped,
                "Skipped {} edge(s) with non-positive length",
                self.skipped
            );
        }
        Graph {
            adjacency: self.adjacency,
            edge_count: self.edge_count,
        }
    }
}
