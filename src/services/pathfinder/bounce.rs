//! Round-trip ("bounce") route composition: outbound leg to a waypoint near
//! a point of interest, then a length-constrained continuation that is
//! discouraged from retracing the outbound leg.

use super::constrained::constrained_length_search;
use super::point_to_point::point_to_point_search;
use crate::config::PathfinderConfig;
use crate::constants::{RETURN_LEG_MAX_FRACTION, RETURN_LEG_MIN_FRACTION};
use crate::db::{VertexRepository, WaypointProvider};
use crate::error::{AppError, Result};
use crate::models::{BounceRoute, Graph, PoiPreferences, PreferenceSet, VertexId};
use std::collections::HashSet;

/// Length budget for the return leg given how far the outbound leg actually
/// went. The asymmetric clamp keeps the return leg from being negligible
/// when the outbound leg overshot, and from dominating when it undershot.
fn return_leg_budget(desired_length: f64, outbound_length: f64) -> f64 {
    (desired_length - outbound_length)
        .min(desired_length * RETURN_LEG_MAX_FRACTION)
        .max(desired_length * RETURN_LEG_MIN_FRACTION)
}

/// Build a round-trip route of roughly `desired_length` through a waypoint
/// near a POI, retrying with the next-ranked waypoint on failure.
///
/// Attempts are strictly sequential: each consumes one candidate from the
/// provider, and the loop stops early when the provider is exhausted. After
/// `config.max_bounce_attempts` failed attempts (or exhaustion) the
/// aggregate error carries the last underlying failure.
#[allow(clippy::too_many_arguments)]
pub async fn find_bounce_route(
    graph: &Graph,
    start: VertexId,
    desired_length: f64,
    prefs: &PreferenceSet,
    poi_preferences: &PoiPreferences,
    waypoints: &mut dyn WaypointProvider,
    vertices: &dyn VertexRepository,
    config: &PathfinderConfig,
) -> Result<BounceRoute> {
    let mut attempts: u32 = 0;
    let mut last_error = AppError::Exhausted("No waypoint candidates produced".to_string());

    while attempts < config.max_bounce_attempts {
        let candidate = match waypoints.next_candidate().await? {
            Some(candidate) => candidate,
            None => {
                tracing::info!(
                    attempts = attempts,
                    "Waypoint candidates exhausted after {} attempt(s)",
                    attempts
                );
                break;
            }
        };
        attempts += 1;

        tracing::info!(
            attempt = attempts,
            waypoint = candidate.vertex_id,
            poi_distance_m = candidate.poi_distance,
            "Trying bounce waypoint {}",
            candidate.vertex_id
        );

        match try_bounce_via(
            graph,
            start,
            candidate.vertex_id,
            desired_length,
            prefs,
            poi_preferences,
            vertices,
            config,
        )
        .await
        {
            Ok(route) => return Ok(route),
            Err(e) if e.is_recoverable() => {
                tracing::debug!(
                    attempt = attempts,
                    waypoint = candidate.vertex_id,
                    error = %e,
                    "Bounce attempt failed, trying next candidate"
                );
                last_error = e;
            }
            Err(e) => return Err(e),
        }
    }

    Err(AppError::BounceFailed {
        attempts,
        last: Box::new(last_error),
    })
}

#[allow(clippy::too_many_arguments)]
async fn try_bounce_via(
    graph: &Graph,
    start: VertexId,
    waypoint: VertexId,
    desired_length: f64,
    prefs: &PreferenceSet,
    poi_preferences: &PoiPreferences,
    vertices: &dyn VertexRepository,
    config: &PathfinderConfig,
) -> Result<BounceRoute> {
    let bounce_coordinates = vertices.coordinates_of(waypoint).await?.ok_or_else(|| {
        AppError::NotFound(format!("Could not find coordinates for vertex {}", waypoint))
    })?;

    let outbound =
        point_to_point_search(graph, start, waypoint, prefs, config.bounce_search_radius_m)?;

    let remaining = return_leg_budget(desired_length, outbound.total_length);
    tracing::debug!(
        outbound_m = outbound.total_length,
        return_budget_m = remaining,
        "Outbound leg found, searching continuation"
    );

    // Penalize (not forbid) revisiting the outbound leg on the way back.
    let avoid: HashSet<VertexId> = outbound.path.vertices().iter().copied().collect();
    let continuation = constrained_length_search(
        graph,
        waypoint,
        remaining,
        config.length_tolerance,
        prefs,
        Some(&avoid),
    )?;

    let total_length = outbound.total_length + continuation.total_length;
    let outbound_length = outbound.total_length;
    let path = outbound.path.join(&continuation.path);

    Ok(BounceRoute {
        total_length,
        path,
        outbound_length,
        return_length: continuation.total_length,
        bounce_vertex: waypoint,
        bounce_coordinates,
        bounce_poi_category: poi_preferences.driving_category(),
    })
}
