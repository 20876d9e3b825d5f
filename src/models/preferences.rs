use crate::error::{AppError, Result};
use crate::models::TrailCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which elevation profile the rider is optimizing for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ElevationMode {
    /// Favor uphill edges.
    Gain,
    /// Favor downhill edges.
    Loss,
    /// Favor flat edges.
    #[default]
    Level,
}

impl fmt::Display for ElevationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevationMode::Gain => write!(f, "gain"),
            ElevationMode::Loss => write!(f, "loss"),
            ElevationMode::Level => write!(f, "level"),
        }
    }
}

impl FromStr for ElevationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gain" | "uphill" => Ok(ElevationMode::Gain),
            "loss" | "downhill" => Ok(ElevationMode::Loss),
            "level" | "flat" => Ok(ElevationMode::Level),
            _ => Err(format!("Invalid elevation mode: '{}'", s)),
        }
    }
}

/// Per-request routing preferences: weighted combination of elevation,
/// surface, and trail-type objectives. Immutable once validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceSet {
    #[serde(default)]
    pub elevation_mode: ElevationMode,
    #[serde(default)]
    pub prefer_hard_surface: bool,
    #[serde(default = "default_trail_type")]
    pub preferred_trail_type: TrailCategory,
    pub elevation_weight: f64,
    pub surface_weight: f64,
    pub trail_weight: f64,
}

fn default_trail_type() -> TrailCategory {
    TrailCategory::Hiking
}

impl Default for PreferenceSet {
    fn default() -> Self {
        PreferenceSet {
            elevation_mode: ElevationMode::default(),
            prefer_hard_surface: false,
            preferred_trail_type: default_trail_type(),
            elevation_weight: 1.0,
            surface_weight: 1.0,
            trail_weight: 1.0,
        }
    }
}

impl PreferenceSet {
    /// Reject malformed weight combinations before any search work begins.
    /// Weights need not sum to 1, but must be non-negative with a positive
    /// total.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("elevation_weight", self.elevation_weight),
            ("surface_weight", self.surface_weight),
            ("trail_weight", self.trail_weight),
        ];
        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(AppError::InvalidRequest(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, w
                )));
            }
        }
        let total = self.elevation_weight + self.surface_weight + self.trail_weight;
        if total <= 0.0 {
            return Err(AppError::InvalidRequest(
                "preference weights must have a positive total".to_string(),
            ));
        }
        Ok(())
    }
}

/// Point-of-interest category that can anchor a bounce waypoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PoiCategory {
    RestaurantGuesthouse,
    Lake,
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoiCategory::RestaurantGuesthouse => write!(f, "restaurant_guesthouse"),
            PoiCategory::Lake => write!(f, "lake"),
        }
    }
}

/// POI constraints for waypoint selection. Distance knobs are interpreted by
/// the waypoint provider collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PoiPreferences {
    #[serde(default)]
    pub restaurant: bool,
    #[serde(default)]
    pub lake: bool,
    /// Maximum distance (meters) between a waypoint and its POI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_poi_distance: Option<f64>,
}

impl PoiPreferences {
    /// Category driving waypoint selection. Restaurant wins when both are
    /// requested, matching the selection order of the waypoint query.
    pub fn driving_category(&self) -> Option<PoiCategory> {
        if self.restaurant {
            Some(PoiCategory::RestaurantGuesthouse)
        } else if self.lake {
            Some(PoiCategory::Lake)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preferences_are_valid() {
        assert!(PreferenceSet::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_weight() {
        let prefs = PreferenceSet {
            surface_weight: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            prefs.validate(),
            Err(crate::error::AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn rejects_all_zero_weights() {
        let prefs = PreferenceSet {
            elevation_weight: 0.0,
            surface_weight: 0.0,
            trail_weight: 0.0,
            ..Default::default()
        };
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let prefs = PreferenceSet {
            elevation_weight: 3.0,
            surface_weight: 2.0,
            trail_weight: 7.0,
            ..Default::default()
        };
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn restaurant_wins_over_lake() {
        let both = PoiPreferences {
            restaurant: true,
            lake: true,
            max_poi_distance: None,
        };
        assert_eq!(
            both.driving_category(),
            Some(PoiCategory::RestaurantGuesthouse)
        );

        let lake_only = PoiPreferences {
            restaurant: false,
            lake: true,
            max_poi_distance: None,
        };
        assert_eq!(lake_only.driving_category(), Some(PoiCategory::Lake));
        assert_eq!(PoiPreferences::default().driving_category(), None);
    }

    #[test]
    fn elevation_mode_parses_aliases() {
        assert_eq!("uphill".parse::<ElevationMode>(), Ok(ElevationMode::Gain));
        assert_eq!("flat".parse::<ElevationMode>(), Ok(ElevationMode::Level));
        assert!("sideways".parse::<ElevationMode>().is_err());
    }
}
