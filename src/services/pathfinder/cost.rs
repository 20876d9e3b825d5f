//! Pure cost model mapping edge attributes and rider preferences to a
//! non-negative scalar used as the Dijkstra edge weight.

use crate::constants::{AVOID_PENALTY_FACTOR, COST_EPSILON, ELEVATION_SENSITIVITY};
use crate::models::{Edge, ElevationMode, PreferenceSet, SurfaceCategory, TrailCategory, VertexId};
use std::collections::HashSet;

/// Combined weighted edge cost, floored at [`COST_EPSILON`]. Edges touching
/// a vertex in `avoid` are penalized by [`AVOID_PENALTY_FACTOR`] before the
/// floor.
pub fn edge_cost(edge: &Edge, prefs: &PreferenceSet, avoid: Option<&HashSet<VertexId>>) -> f64 {
    let mut cost = prefs.elevation_weight * elevation_cost(edge.elevation_diff, prefs.elevation_mode)
        + prefs.surface_weight * surface_cost(edge.surface, prefs.prefer_hard_surface)
        + prefs.trail_weight * trail_cost(edge.trail_type, prefs.preferred_trail_type);

    if let Some(avoid) = avoid {
        if !avoid.is_empty() && (avoid.contains(&edge.source) || avoid.contains(&edge.target)) {
            cost *= AVOID_PENALTY_FACTOR;
        }
    }

    cost.max(COST_EPSILON)
}

/// Logistic transform of the elevation difference. Exactly 0.5 for flat
/// edges in every mode.
pub fn elevation_cost(elevation_diff: f64, mode: ElevationMode) -> f64 {
    if elevation_diff == 0.0 {
        return 0.5;
    }
    match mode {
        // Near 0 for strong climbs, near 1 for strong descents.
        ElevationMode::Gain => 1.0 / (1.0 + (elevation_diff / ELEVATION_SENSITIVITY).exp()),
        ElevationMode::Loss => 1.0 / (1.0 + (-elevation_diff / ELEVATION_SENSITIVITY).exp()),
        // Near 0 when flat, approaches 1 as |diff| grows.
        ElevationMode::Level => 1.0 - (-elevation_diff.abs() / ELEVATION_SENSITIVITY).exp(),
    }
}

pub fn surface_cost(surface: SurfaceCategory, prefer_hard: bool) -> f64 {
    match surface {
        SurfaceCategory::Hard => {
            if prefer_hard {
                0.0
            } else {
                1.0
            }
        }
        SurfaceCategory::Natural => {
            if prefer_hard {
                1.0
            } else {
                0.0
            }
        }
        SurfaceCategory::Unknown => 0.5,
    }
}

pub fn trail_cost(trail_type: TrailCategory, preferred: TrailCategory) -> f64 {
    if trail_type == preferred {
        0.0
    } else if trail_type == TrailCategory::Unknown {
        0.5
    } else {
        1.0
    }
}
