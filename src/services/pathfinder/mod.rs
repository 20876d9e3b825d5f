mod bounce;
mod constrained;
pub mod cost;
mod dijkstra;
mod point_to_point;
mod subgraph;

use crate::config::PathfinderConfig;
use crate::db::{VertexRepository, WaypointProvider};
use crate::error::{AppError, Result};
use crate::models::{BounceRoute, Graph, PoiPreferences, PreferenceSet, SearchResult, VertexId};
use std::sync::Arc;

pub use subgraph::Subgraph;

/// Route search facade over one immutable graph snapshot. All searches are
/// read-only; a `Pathfinder` can be shared freely across requests.
pub struct Pathfinder {
    graph: Arc<Graph>,
    config: PathfinderConfig,
}

impl Pathfinder {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self::with_config(graph, PathfinderConfig::default())
    }

    pub fn with_config(graph: Arc<Graph>, config: PathfinderConfig) -> Self {
        Pathfinder { graph, config }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Find a path from `start` whose length lies within `tolerance` of
    /// `desired_length`, minimizing cost under `prefs`.
    pub fn explore(
        &self,
        start: VertexId,
        desired_length: f64,
        prefs: &PreferenceSet,
        tolerance: f64,
    ) -> Result<SearchResult> {
        prefs.validate()?;
        validate_length(desired_length)?;
        validate_tolerance(tolerance)?;
        validate_vertex(&self.graph, start)?;

        constrained::constrained_length_search(
            &self.graph,
            start,
            desired_length,
            tolerance,
            prefs,
            None,
        )
    }

    /// Find the minimum-cost path from `start` to `target` within
    /// `search_radius` meters.
    pub fn path_to(
        &self,
        start: VertexId,
        target: VertexId,
        prefs: &PreferenceSet,
        search_radius: f64,
    ) -> Result<SearchResult> {
        prefs.validate()?;
        validate_length(search_radius)?;
        validate_vertex(&self.graph, start)?;

        point_to_point::point_to_point_search(&self.graph, start, target, prefs, search_radius)
    }

    /// Build a round-trip route through a waypoint near a POI. The waypoint
    /// provider should target an outbound distance of
    /// `desired_length * bounce_factor`; constructing it is the caller's
    /// responsibility since the provider is a per-request stream.
    pub async fn bounce(
        &self,
        start: VertexId,
        desired_length: f64,
        prefs: &PreferenceSet,
        bounce_factor: f64,
        poi_preferences: &PoiPreferences,
        waypoints: &mut dyn WaypointProvider,
        vertices: &dyn VertexRepository,
    ) -> Result<BounceRoute> {
        prefs.validate()?;
        validate_length(desired_length)?;
        validate_bounce_factor(bounce_factor)?;
        validate_vertex(&self.graph, start)?;

        bounce::find_bounce_route(
            &self.graph,
            start,
            desired_length,
            prefs,
            poi_preferences,
            waypoints,
            vertices,
            &self.config,
        )
        .await
    }
}

fn validate_length(length: f64) -> Result<()> {
    if !length.is_finite() || length <= 0.0 {
        return Err(AppError::InvalidRequest(format!(
            "length must be positive and finite, got {}",
            length
        )));
    }
    Ok(())
}

fn validate_tolerance(tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || tolerance <= 0.0 || tolerance >= 1.0 {
        return Err(AppError::InvalidRequest(format!(
            "tolerance must be in (0, 1), got {}",
            tolerance
        )));
    }
    Ok(())
}

fn validate_bounce_factor(factor: f64) -> Result<()> {
    if !factor.is_finite() || factor <= 0.0 || factor >= 1.0 {
        return Err(AppError::InvalidRequest(format!(
            "bounce factor must be in (0, 1), got {}",
            factor
        )));
    }
    Ok(())
}

fn validate_vertex(graph: &Graph, vertex: VertexId) -> Result<()> {
    if !graph.contains_vertex(vertex) {
        return Err(AppError::InvalidRequest(format!(
            "start vertex {} is not in the graph",
            vertex
        )));
    }
    Ok(())
}
