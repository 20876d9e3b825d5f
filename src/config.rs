use crate::constants::*;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub trail_snapshot_path: PathBuf,
    pub street_snapshot_path: PathBuf,
    pub snapshot_max_age: Duration,
    pub pathfinder: PathfinderConfig,
}

#[derive(Debug, Clone)]
pub struct PathfinderConfig {
    /// Tolerance band around the desired length (fraction, 0..1)
    pub length_tolerance: f64,

    /// Position of the bounce waypoint along the route (fraction, 0..1)
    pub bounce_factor: f64,

    /// Search radius (meters) for the outbound leg of a bounce route
    pub bounce_search_radius_m: f64,

    /// Maximum waypoint attempts before a bounce request fails
    pub max_bounce_attempts: u32,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
            bounce_factor: DEFAULT_BOUNCE_FACTOR,
            bounce_search_radius_m: BOUNCE_SEARCH_RADIUS_M,
            max_bounce_attempts: MAX_BOUNCE_ATTEMPTS,
        }
    }
}

impl PathfinderConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        Ok(Self {
            length_tolerance: env::var("PATH_LENGTH_TOLERANCE")
                .unwrap_or_else(|_| defaults.length_tolerance.to_string())
                .parse()
                .map_err(|_| "Invalid PATH_LENGTH_TOLERANCE")?,

            bounce_factor: env::var("PATH_BOUNCE_FACTOR")
                .unwrap_or_else(|_| defaults.bounce_factor.to_string())
                .parse()
                .map_err(|_| "Invalid PATH_BOUNCE_FACTOR")?,

            bounce_search_radius_m: env::var("PATH_BOUNCE_SEARCH_RADIUS_M")
                .unwrap_or_else(|_| defaults.bounce_search_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid PATH_BOUNCE_SEARCH_RADIUS_M")?,

            max_bounce_attempts: env::var("PATH_MAX_BOUNCE_ATTEMPTS")
                .unwrap_or_else(|_| defaults.max_bounce_attempts.to_string())
                .parse()
                .map_err(|_| "Invalid PATH_MAX_BOUNCE_ATTEMPTS")?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let snapshot_max_age_seconds: u64 = env::var("GRAPH_SNAPSHOT_MAX_AGE_SECONDS")
            .unwrap_or_else(|_| DEFAULT_SNAPSHOT_MAX_AGE_SECONDS.to_string())
            .parse()
            .map_err(|_| "Invalid GRAPH_SNAPSHOT_MAX_AGE_SECONDS")?;

        Ok(Config {
            database_url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            trail_snapshot_path: env::var("TRAIL_SNAPSHOT_PATH")
                .unwrap_or_else(|_| DEFAULT_TRAIL_SNAPSHOT_PATH.to_string())
                .into(),
            street_snapshot_path: env::var("STREET_SNAPSHOT_PATH")
                .unwrap_or_else(|_| DEFAULT_STREET_SNAPSHOT_PATH.to_string())
                .into(),
            snapshot_max_age: Duration::from_secs(snapshot_max_age_seconds),
            pathfinder: PathfinderConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathfinder_defaults_match_constants() {
        let config = PathfinderConfig::default();
        assert_eq!(config.length_tolerance, DEFAULT_LENGTH_TOLERANCE);
        assert_eq!(config.bounce_factor, DEFAULT_BOUNCE_FACTOR);
        assert_eq!(config.bounce_search_radius_m, BOUNCE_SEARCH_RADIUS_M);
        assert_eq!(config.max_bounce_attempts, MAX_BOUNCE_ATTEMPTS);
    }
}
