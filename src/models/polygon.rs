// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Zone boundary polygon model and coordinate types.
//!
//! `ZonePolygon` keeps the outer ring as the flat vertex list found in the
//! source GeoJSON, including the duplicated closing vertex. Several quirks of
//! the dashboard depend on that representation (the vertex-mean centroid and
//! the per-vertex edit handles both walk the listed points), so the ring is
//! never silently re-closed or deduplicated here. `geo::Polygon` is not used
//! as the storage type because it repairs ring closure on construction, which
//! would hide exactly the defects ring validation has to report.

use geo::{coord, Coord, LineString, Polygon};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::geometry::{collect_ring_errors, GeometryError};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and within the valid WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Convert to a `geo` coordinate (x = longitude, y = latitude).
    pub fn to_coord(self) -> Coord<f64> {
        coord! { x: self.lng, y: self.lat }
    }

    /// Build from a `geo` coordinate (x = longitude, y = latitude).
    pub fn from_coord(c: Coord<f64>) -> Self {
        Self {
            lat: c.y,
            lng: c.x,
        }
    }
}

/// A service-zone boundary: one closed outer ring, no holes.
///
/// Serializes as a GeoJSON-style coordinate list `[[lng, lat], ...]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZonePolygon {
    ring: Vec<Coord<f64>>,
}

impl ZonePolygon {
    /// Wrap a raw ring exactly as given (no closure repair).
    pub fn from_ring(ring: Vec<Coord<f64>>) -> Self {
        Self { ring }
    }

    /// Build from the raw vertex path of a finished sketch.
    ///
    /// Map drawing tools report the path without the closing vertex; this
    /// appends the first point when the path is not already closed.
    pub fn from_unclosed_path(path: Vec<Coord<f64>>) -> Self {
        let mut ring = path;
        if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
            if first != last {
                ring.push(first);
            }
        }
        Self { ring }
    }

    /// Strict conversion from a raw GeoJSON geometry.
    ///
    /// Fails with the first structural problem found; callers that want the
    /// full error list should run `geometry::validate_closed_ring` instead.
    pub fn from_geojson(geometry: Option<&geojson::Geometry>) -> Result<Self, GeometryError> {
        if let Some(err) = collect_ring_errors(geometry).into_iter().next() {
            return Err(err);
        }
        // The checks above guarantee a non-empty Polygon with 2-element pairs.
        let Some(geometry) = geometry else {
            return Err(GeometryError::Missing);
        };
        let geojson::Value::Polygon(rings) = &geometry.value else {
            return Err(GeometryError::Missing);
        };
        let Some(outer) = rings.first() else {
            return Err(GeometryError::EmptyCoordinates);
        };
        let ring = outer
            .iter()
            .map(|pos| coord! { x: pos[0], y: pos[1] })
            .collect();
        Ok(Self { ring })
    }

    /// Lenient conversion for display paths that must not reject bad data.
    ///
    /// Takes the outer ring as-is, skipping positions with fewer than two
    /// components; performs no closure or range checks. Returns `None` when
    /// the geometry is not a Polygon or has no rings.
    pub fn from_geojson_lenient(geometry: &geojson::Geometry) -> Option<Self> {
        let geojson::Value::Polygon(rings) = &geometry.value else {
            return None;
        };
        let outer = rings.first()?;
        let ring = outer
            .iter()
            .filter(|pos| pos.len() >= 2)
            .map(|pos| coord! { x: pos[0], y: pos[1] })
            .collect();
        Some(Self { ring })
    }

    /// Export as a GeoJSON Polygon geometry.
    pub fn to_geojson(&self) -> geojson::Geometry {
        let outer: Vec<Vec<f64>> = self.ring.iter().map(|c| vec![c.x, c.y]).collect();
        geojson::Geometry::new(geojson::Value::Polygon(vec![outer]))
    }

    /// Convert to a `geo::Polygon` for consumers that want the full
    /// algorithm suite. Note that `geo` closes open rings on construction.
    pub fn to_geo(&self) -> Polygon<f64> {
        Polygon::new(LineString::new(self.ring.clone()), vec![])
    }

    /// The outer ring, including the duplicated closing vertex when present.
    pub fn ring(&self) -> &[Coord<f64>] {
        &self.ring
    }

    /// Consume the polygon, returning the raw ring.
    pub fn into_ring(self) -> Vec<Coord<f64>> {
        self.ring
    }

    /// Number of listed vertices (the closing duplicate counts).
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Whether the first and last listed vertices are identical.
    pub fn is_closed(&self) -> bool {
        match (self.ring.first(), self.ring.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }
}

impl Serialize for ZonePolygon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pairs: Vec<[f64; 2]> = self.ring.iter().map(|c| [c.x, c.y]).collect();
        pairs.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ZonePolygon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<[f64; 2]>::deserialize(deserializer)?;
        let ring = pairs
            .into_iter()
            .map(|p| coord! { x: p[0], y: p[1] })
            .collect();
        Ok(Self { ring })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_path() -> Vec<Coord<f64>> {
        vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 0.0, y: 1.0 },
        ]
    }

    #[test]
    fn test_from_unclosed_path_appends_first_point() {
        let polygon = ZonePolygon::from_unclosed_path(square_path());
        assert_eq!(polygon.len(), 5);
        assert!(polygon.is_closed());
    }

    #[test]
    fn test_from_unclosed_path_keeps_closed_ring() {
        let mut path = square_path();
        path.push(path[0]);
        let polygon = ZonePolygon::from_unclosed_path(path);
        assert_eq!(polygon.len(), 5);
        assert!(polygon.is_closed());
    }

    #[test]
    fn test_from_unclosed_path_empty() {
        let polygon = ZonePolygon::from_unclosed_path(Vec::new());
        assert!(polygon.is_empty());
        assert!(!polygon.is_closed());
    }

    #[test]
    fn test_geojson_round_trip() {
        let polygon = ZonePolygon::from_unclosed_path(square_path());
        let geometry = polygon.to_geojson();
        let back = ZonePolygon::from_geojson(Some(&geometry)).expect("round trip should parse");
        assert_eq!(back, polygon);
    }

    #[test]
    fn test_from_geojson_rejects_unclosed() {
        let geometry = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
        ]]));
        let err = ZonePolygon::from_geojson(Some(&geometry)).unwrap_err();
        assert_eq!(err, GeometryError::RingNotClosed);
    }

    #[test]
    fn test_lenient_skips_short_positions() {
        let geometry = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0],
            vec![1.0, 1.0],
        ]]));
        let polygon = ZonePolygon::from_geojson_lenient(&geometry).expect("polygon geometry");
        assert_eq!(polygon.len(), 2);
    }

    #[test]
    fn test_serde_shape_is_pair_list() {
        let polygon = ZonePolygon::from_unclosed_path(square_path());
        let json = serde_json::to_string(&polygon).expect("serialize");
        assert!(json.starts_with("[[0.0,0.0]"));
        let back: ZonePolygon = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, polygon);
    }

    #[test]
    fn test_latlng_validity() {
        assert!(LatLng::new(23.8, 90.4).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -181.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }
}
