//! Editor configuration loaded from environment variables.
//!
//! Everything has a sensible default so the editor can run with no
//! environment at all; deployments override per city.

use std::env;

use crate::geometry::DEFAULT_SIMPLIFY_TOLERANCE_DEG;
use crate::models::polygon::LatLng;

/// Fallback map center (Dhaka) when none is configured.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 23.8103,
    lng: 90.4125,
};

/// Fallback zoom level for city-scale views.
pub const DEFAULT_ZOOM: u8 = 12;

/// Editor configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Map center used when a session or view has nothing better
    pub default_center: LatLng,
    /// Initial zoom level
    pub default_zoom: u8,
    /// Near-duplicate vertex threshold for simplification (degrees)
    pub simplify_tolerance_deg: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            simplify_tolerance_deg: DEFAULT_SIMPLIFY_TOLERANCE_DEG,
        }
    }
}

impl EditorConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults; a configured
    /// center outside the valid lat/lng ranges is an error rather than a
    /// silent fallback, since every session would inherit it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let default_center = LatLng::new(
            parse_var("ZONE_MAP_DEFAULT_LAT", DEFAULT_CENTER.lat),
            parse_var("ZONE_MAP_DEFAULT_LNG", DEFAULT_CENTER.lng),
        );
        if !default_center.is_valid() {
            return Err(ConfigError::InvalidCenter {
                lat: default_center.lat,
                lng: default_center.lng,
            });
        }

        Ok(Self {
            default_center,
            default_zoom: parse_var("ZONE_MAP_DEFAULT_ZOOM", DEFAULT_ZOOM),
            simplify_tolerance_deg: parse_var(
                "ZONE_SIMPLIFY_TOLERANCE_DEG",
                DEFAULT_SIMPLIFY_TOLERANCE_DEG,
            ),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configured map center ({lat}, {lng}) is out of range")]
    InvalidCenter { lat: f64, lng: f64 },
}
