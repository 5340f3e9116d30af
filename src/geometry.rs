// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Polygon math for service-zone boundaries.
//!
//! Everything here works on plain lat/lng degrees:
//! - Vertex-mean centroid (the dashboard's historical "center" definition)
//! - Structural closed-ring validation with accumulated errors
//! - Spherical-excess area estimation
//! - Bounding-box overlap screening and viewport fitting
//! - Ray-cast point-in-polygon hit testing
//! - Near-duplicate vertex dropping (simplification)
//!
//! None of these functions touch a projection. Degrees in, degrees out, with
//! the single exception of the area estimate which converts to radians
//! internally.

use geo::{coord, Coord, Intersects, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::polygon::{LatLng, ZonePolygon};
use crate::models::validation::ValidationResult;
use crate::models::zone::ZoneSummary;

/// Mean Earth radius used by the spherical area estimate, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default near-duplicate threshold for `simplify`, in degrees.
pub const DEFAULT_SIMPLIFY_TOLERANCE_DEG: f64 = 1e-4;

/// A structural problem with a zone boundary ring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Zone boundary geometry is missing")]
    Missing,
    #[error("Zone boundary must be a GeoJSON Polygon, got {0}")]
    NotAPolygon(&'static str),
    #[error("Zone boundary polygon has no coordinate rings")]
    EmptyCoordinates,
    #[error("Zone boundary ring must have at least 4 points, got {0}")]
    TooFewPoints(usize),
    #[error("Zone boundary ring is not closed (first and last points differ)")]
    RingNotClosed,
    #[error("Coordinate at position {0} must be a [lng, lat] pair")]
    MalformedCoordinate(usize),
    #[error("Longitude {value} at position {index} is outside [-180, 180]")]
    LongitudeOutOfRange { index: usize, value: f64 },
    #[error("Latitude {value} at position {index} is outside [-90, 90]")]
    LatitudeOutOfRange { index: usize, value: f64 },
}

fn geometry_type_label(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Check a raw GeoJSON geometry against the closed-ring rules, accumulating
/// every problem found rather than stopping at the first.
///
/// The checks, in order: geometry present, geometry is a Polygon, at least
/// one ring, outer ring has >= 4 points, ring is closed, every position is a
/// finite 2-element pair within the valid longitude/latitude ranges. An
/// unclosed ring is reported independently of the other checks, so a short
/// open ring yields both errors.
pub fn collect_ring_errors(geometry: Option<&geojson::Geometry>) -> Vec<GeometryError> {
    let Some(geometry) = geometry else {
        return vec![GeometryError::Missing];
    };
    let geojson::Value::Polygon(rings) = &geometry.value else {
        return vec![GeometryError::NotAPolygon(geometry_type_label(
            &geometry.value,
        ))];
    };
    let Some(outer) = rings.first() else {
        return vec![GeometryError::EmptyCoordinates];
    };

    let mut errors = Vec::new();
    if outer.len() < 4 {
        errors.push(GeometryError::TooFewPoints(outer.len()));
    }
    if outer.len() >= 2 && outer.first() != outer.last() {
        errors.push(GeometryError::RingNotClosed);
    }
    for (index, position) in outer.iter().enumerate() {
        if position.len() != 2 {
            errors.push(GeometryError::MalformedCoordinate(index));
            continue;
        }
        let (lng, lat) = (position[0], position[1]);
        // Range containment rejects NaN as well as out-of-range values.
        if !(-180.0..=180.0).contains(&lng) {
            errors.push(GeometryError::LongitudeOutOfRange { index, value: lng });
        }
        if !(-90.0..=90.0).contains(&lat) {
            errors.push(GeometryError::LatitudeOutOfRange { index, value: lat });
        }
    }
    errors
}

/// Closed-ring validation packaged as a `ValidationResult` for form flows.
pub fn validate_closed_ring(geometry: Option<&geojson::Geometry>) -> ValidationResult {
    let errors = collect_ring_errors(geometry);
    let mut result = ValidationResult::ok();
    for error in errors {
        result.push_error(error.to_string());
    }
    result
}

/// Arithmetic mean of the listed ring vertices, or `None` for an empty ring.
///
/// Every listed vertex contributes, including the duplicated closing vertex,
/// so the result is biased toward the ring's first point. The dashboard has
/// always displayed this value as the zone center; keep the bias.
pub fn ring_centroid(ring: &[Coord<f64>]) -> Option<LatLng> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (sum_lng, sum_lat) = ring
        .iter()
        .fold((0.0, 0.0), |(lng, lat), c| (lng + c.x, lat + c.y));
    Some(LatLng::new(sum_lat / n, sum_lng / n))
}

/// Vertex-mean center of a zone polygon. See [`ring_centroid`].
pub fn centroid(polygon: &ZonePolygon) -> Option<LatLng> {
    ring_centroid(polygon.ring())
}

/// Estimate the enclosed area in square kilometers on a spherical Earth.
///
/// Sums `(lng2 - lng1) * (2 + sin(lat1) + sin(lat2))` in radians over
/// consecutive listed vertex pairs, scales by `R^2 / 2`, and takes the
/// absolute value, so ring orientation does not matter. Fewer than two
/// vertices yield zero. Self-intersecting rings produce partial
/// cancellation; the result is an estimate, not a guarantee.
pub fn estimate_area_km2(polygon: &ZonePolygon) -> f64 {
    let ring = polygon.ring();
    if ring.len() < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for pair in ring.windows(2) {
        let lng1 = pair[0].x.to_radians();
        let lat1 = pair[0].y.to_radians();
        let lng2 = pair[1].x.to_radians();
        let lat2 = pair[1].y.to_radians();
        sum += (lng2 - lng1) * (2.0 + lat1.sin() + lat2.sin());
    }
    (sum * EARTH_RADIUS_KM * EARTH_RADIUS_KM / 2.0).abs()
}

/// Axis-aligned bounding box of the ring in degrees, or `None` when empty.
pub fn viewport_bounds(polygon: &ZonePolygon) -> Option<Rect<f64>> {
    let ring = polygon.ring();
    let first = ring.first()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.x, first.y);
    for c in &ring[1..] {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }
    Some(Rect::new(
        coord! { x: min_x, y: min_y },
        coord! { x: max_x, y: max_y },
    ))
}

/// Smallest bounding box covering every polygon, or `None` if all are empty.
pub fn combined_bounds<'a, I>(polygons: I) -> Option<Rect<f64>>
where
    I: IntoIterator<Item = &'a ZonePolygon>,
{
    let mut merged: Option<Rect<f64>> = None;
    for polygon in polygons {
        let Some(bounds) = viewport_bounds(polygon) else {
            continue;
        };
        merged = Some(match merged {
            None => bounds,
            Some(acc) => Rect::new(
                coord! {
                    x: acc.min().x.min(bounds.min().x),
                    y: acc.min().y.min(bounds.min().y),
                },
                coord! {
                    x: acc.max().x.max(bounds.max().x),
                    y: acc.max().y.max(bounds.max().y),
                },
            ),
        });
    }
    merged
}

/// Conservative overlap screen: do the bounding boxes of the two rings
/// intersect? Touching edges count as overlap. Either polygon being empty
/// means no overlap.
pub fn bounding_boxes_overlap(a: &ZonePolygon, b: &ZonePolygon) -> bool {
    match (viewport_bounds(a), viewport_bounds(b)) {
        (Some(ra), Some(rb)) => ra.intersects(&rb),
        _ => false,
    }
}

/// Ray-cast point-in-polygon test over the listed ring.
///
/// Casts a horizontal ray and counts crossings, so boundary points land on
/// one side or the other depending on edge direction; callers needing exact
/// boundary semantics should not rely on edge hits. Rings with fewer than
/// three vertices contain nothing. The duplicated closing vertex contributes
/// a zero-length edge, which never crosses the ray.
pub fn point_in_polygon(point: LatLng, polygon: &ZonePolygon) -> bool {
    let ring = polygon.ring();
    if ring.len() < 3 {
        return false;
    }
    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Drop vertices whose successor (cyclically) is closer than `tolerance_deg`
/// in Euclidean degree distance, then re-close the ring.
///
/// A vertex is kept when the distance to the next listed vertex is at least
/// the tolerance. The closing duplicate is always dropped by the cyclic
/// comparison and re-appended afterwards, so a clean ring passes through
/// unchanged. A tolerance larger than every edge empties the ring.
pub fn simplify(polygon: &ZonePolygon, tolerance_deg: f64) -> ZonePolygon {
    let ring = polygon.ring();
    if ring.is_empty() {
        return polygon.clone();
    }
    let n = ring.len();
    let mut kept: Vec<Coord<f64>> = Vec::with_capacity(n);
    for i in 0..n {
        let current = ring[i];
        let next = ring[(i + 1) % n];
        let dx = next.x - current.x;
        let dy = next.y - current.y;
        if (dx * dx + dy * dy).sqrt() >= tolerance_deg {
            kept.push(current);
        }
    }
    if let (Some(&first), Some(&last)) = (kept.first(), kept.last()) {
        if first != last {
            kept.push(first);
        }
    }
    ZonePolygon::from_ring(kept)
}

/// Derived geometry facts for a boundary being created or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneGeometryAnalysis {
    pub area_km2: f64,
    pub center: Option<LatLng>,
    /// IDs of sibling zones whose bounding boxes overlap this boundary.
    pub overlaps_with: Vec<i64>,
}

/// Compute area, center, and bounding-box overlaps against sibling zones.
///
/// `exclude_id` removes the zone being edited from the overlap scan so it
/// never reports overlapping itself.
pub fn analyze(
    polygon: &ZonePolygon,
    siblings: &[ZoneSummary],
    exclude_id: Option<i64>,
) -> ZoneGeometryAnalysis {
    let overlaps_with = siblings
        .iter()
        .filter(|zone| exclude_id != Some(zone.id))
        .filter(|zone| {
            zone.boundary
                .as_ref()
                .is_some_and(|boundary| bounding_boxes_overlap(polygon, boundary))
        })
        .map(|zone| zone.id)
        .collect();
    ZoneGeometryAnalysis {
        area_km2: estimate_area_km2(polygon),
        center: centroid(polygon),
        overlaps_with,
    }
}
