mod coordinates;
mod graph;
mod preferences;
mod route;

pub use coordinates::Coordinates;
pub use graph::{Edge, Graph, GraphBuilder, GraphStats, SurfaceCategory, TrailCategory, VertexId};
pub use preferences::{ElevationMode, PoiCategory, PoiPreferences, PreferenceSet};
pub use route::{BounceRoute, Path, SearchResult, WaypointCandidate};
