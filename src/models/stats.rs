//! Zone statistics aggregates for the overview panel.
//!
//! Recomputed in one pass whenever the zone list changes, so the panel
//! never has to walk the zones itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::geometry;
use crate::models::ZoneRecord;

/// Aggregate figures over the currently displayed zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneStats {
    // ─── Counts ──────────────────────────────────────────────────
    /// Total zones on the map
    #[serde(default)]
    pub total_zones: u32,
    /// Zones currently marked active
    #[serde(default)]
    pub active_zones: u32,
    /// Zone count per type ("regular" / "premium" / "restricted")
    #[serde(default)]
    pub zones_by_type: HashMap<String, u32>,

    // ─── Averages ────────────────────────────────────────────────
    /// Mean pricing multiplier (0 when there are no zones)
    #[serde(default)]
    pub avg_pricing_multiplier: f64,
    /// Mean demand multiplier (0 when there are no zones)
    #[serde(default)]
    pub avg_demand_multiplier: f64,

    // ─── Coverage ────────────────────────────────────────────────
    /// Sum of estimated zone areas (km²)
    #[serde(default)]
    pub total_area_km2: f64,
}

impl Default for ZoneStats {
    fn default() -> Self {
        Self {
            total_zones: 0,
            active_zones: 0,
            zones_by_type: HashMap::new(),
            avg_pricing_multiplier: 0.0,
            avg_demand_multiplier: 0.0,
            total_area_km2: 0.0,
        }
    }
}

impl ZoneStats {
    /// Aggregate a zone list in a single pass.
    pub fn from_zones(zones: &[ZoneRecord]) -> Self {
        let mut stats = Self::default();
        if zones.is_empty() {
            return stats;
        }

        let mut pricing_sum = 0.0;
        let mut demand_sum = 0.0;
        for zone in zones {
            stats.total_zones += 1;
            if zone.active {
                stats.active_zones += 1;
            }
            *stats.zones_by_type.entry(zone.type_key()).or_insert(0) += 1;
            pricing_sum += zone.pricing_multiplier;
            demand_sum += zone.demand_multiplier;
            stats.total_area_km2 += geometry::estimate_area_km2(&zone.boundary);
        }

        let n = zones.len() as f64;
        stats.avg_pricing_multiplier = pricing_sum / n;
        stats.avg_demand_multiplier = demand_sum / n;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LatLng, ZonePolygon, ZoneType};
    use geo::coord;

    fn make_zone(id: i64, zone_type: ZoneType, active: bool, pricing: f64) -> ZoneRecord {
        let boundary = ZonePolygon::from_ring(vec![
            coord! { x: 90.40, y: 23.80 },
            coord! { x: 90.42, y: 23.80 },
            coord! { x: 90.42, y: 23.82 },
            coord! { x: 90.40, y: 23.82 },
            coord! { x: 90.40, y: 23.80 },
        ]);
        ZoneRecord {
            id,
            name: format!("Zone {}", id),
            city_id: 1,
            zone_type,
            active,
            boundary,
            center: LatLng::new(23.81, 90.41),
            pricing_multiplier: pricing,
            demand_multiplier: 1.0,
        }
    }

    #[test]
    fn test_from_zones_counts_and_averages() {
        let zones = vec![
            make_zone(1, ZoneType::Regular, true, 1.0),
            make_zone(2, ZoneType::Premium, true, 2.0),
            make_zone(3, ZoneType::Regular, false, 3.0),
        ];

        let stats = ZoneStats::from_zones(&zones);

        assert_eq!(stats.total_zones, 3);
        assert_eq!(stats.active_zones, 2);
        assert_eq!(stats.zones_by_type.get("regular"), Some(&2));
        assert_eq!(stats.zones_by_type.get("premium"), Some(&1));
        assert_eq!(stats.zones_by_type.get("restricted"), None);
        assert!((stats.avg_pricing_multiplier - 2.0).abs() < 1e-12);
        assert!((stats.avg_demand_multiplier - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_zones_sums_area() {
        let zones = vec![
            make_zone(1, ZoneType::Regular, true, 1.0),
            make_zone(2, ZoneType::Regular, true, 1.0),
        ];
        let one = geometry::estimate_area_km2(&zones[0].boundary);
        let stats = ZoneStats::from_zones(&zones);
        assert!(one > 0.0);
        assert!((stats.total_area_km2 - 2.0 * one).abs() < 1e-9);
    }

    #[test]
    fn test_from_zones_empty() {
        let stats = ZoneStats::from_zones(&[]);
        assert_eq!(stats, ZoneStats::default());
        assert_eq!(stats.avg_pricing_multiplier, 0.0);
    }
}
