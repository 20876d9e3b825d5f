//! Stable application-wide constants.
//!
//! Values here are algorithm coefficients and default fallbacks for
//! env-var-based configuration. They should rarely change. For tuning knobs
//! that benefit from runtime experimentation, see
//! [`PathfinderConfig`](crate::config::PathfinderConfig) instead.

// --- Cost model coefficients ---

/// Sensitivity of the logistic elevation transform (meters of elevation
/// difference per unit of sigmoid input).
pub const ELEVATION_SENSITIVITY: f64 = 5.0;
/// Lower bound on any edge cost. Keeps Dijkstra well-defined and prevents
/// zero-cost cycles from being traversed for free.
pub const COST_EPSILON: f64 = 1e-6;
/// Multiplier applied to edges touching an avoided vertex (the outbound leg
/// of a bounce route). Discourages retracing without forbidding it.
pub const AVOID_PENALTY_FACTOR: f64 = 10.0;

// --- Search defaults ---

/// Default tolerance band around the desired length (fraction).
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 0.1;
/// Search radius (meters) for the outbound leg of a bounce route.
pub const BOUNCE_SEARCH_RADIUS_M: f64 = 20_000.0;
/// Upper bound on bounce waypoint attempts before giving up.
pub const MAX_BOUNCE_ATTEMPTS: u32 = 10;
/// Default position of the bounce waypoint along the route (fraction of the
/// desired length).
pub const DEFAULT_BOUNCE_FACTOR: f64 = 0.4;
/// Return leg of a bounce route is never shorter than this fraction of the
/// desired length, even when the outbound leg overshot.
pub const RETURN_LEG_MIN_FRACTION: f64 = 0.2;
/// Return leg of a bounce route is never longer than this fraction of the
/// desired length, even when the outbound leg undershot.
pub const RETURN_LEG_MAX_FRACTION: f64 = 0.6;
/// Waypoint candidates may lie up to this factor beyond the target outbound
/// distance from the start vertex.
pub const WAYPOINT_DISTANCE_FLEX: f64 = 1.2;

// --- Graph snapshot defaults ---

/// Default snapshot freshness window: 24 hours. Overridden by
/// `GRAPH_SNAPSHOT_MAX_AGE_SECONDS`.
pub const DEFAULT_SNAPSHOT_MAX_AGE_SECONDS: u64 = 86_400;
/// Default on-disk snapshot path for the trail network graph.
pub const DEFAULT_TRAIL_SNAPSHOT_PATH: &str = "trail_graph.json";
/// Default on-disk snapshot path for the street network graph.
pub const DEFAULT_STREET_SNAPSHOT_PATH: &str = "street_graph.json";
