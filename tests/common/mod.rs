// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use geo::{coord, Coord};
use zone_editor::config::EditorConfig;
use zone_editor::models::{LatLng, ZoneInput, ZonePolygon, ZoneRecord, ZoneType};
use zone_editor::services::ZoneService;

/// Initialize test logging once; safe to call from every test.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default editor config (Dhaka center, zoom 12).
#[allow(dead_code)]
pub fn test_config() -> EditorConfig {
    EditorConfig::default()
}

/// Closed square ring with the given origin corner and side, in degrees.
#[allow(dead_code)]
pub fn square_ring(origin_lng: f64, origin_lat: f64, size: f64) -> Vec<Coord<f64>> {
    vec![
        coord! { x: origin_lng, y: origin_lat },
        coord! { x: origin_lng + size, y: origin_lat },
        coord! { x: origin_lng + size, y: origin_lat + size },
        coord! { x: origin_lng, y: origin_lat + size },
        coord! { x: origin_lng, y: origin_lat },
    ]
}

/// The same square as an unclosed sketch path (what drawing tools report).
#[allow(dead_code)]
pub fn square_path(origin_lng: f64, origin_lat: f64, size: f64) -> Vec<Coord<f64>> {
    let mut ring = square_ring(origin_lng, origin_lat, size);
    ring.pop();
    ring
}

/// Closed square as a zone boundary polygon.
#[allow(dead_code)]
pub fn closed_square(origin_lng: f64, origin_lat: f64, size: f64) -> ZonePolygon {
    ZonePolygon::from_ring(square_ring(origin_lng, origin_lat, size))
}

/// A square boundary as raw GeoJSON, for validator payloads.
#[allow(dead_code)]
pub fn square_geometry(origin_lng: f64, origin_lat: f64, size: f64) -> geojson::Geometry {
    closed_square(origin_lng, origin_lat, size).to_geojson()
}

/// A complete, valid create payload with a ~5 km² boundary near Dhaka.
#[allow(dead_code)]
pub fn valid_zone_input() -> ZoneInput {
    ZoneInput {
        name: Some("Test Zone".to_string()),
        city_id: Some(1),
        zone_type: Some("regular".to_string()),
        boundaries: Some(square_geometry(90.40, 23.80, 0.02)),
        center_lat: Some(23.81),
        center_lng: Some(90.41),
        pricing_multiplier: Some(1.2),
        demand_multiplier: Some(1.0),
        min_drivers: Some(5),
        max_drivers: Some(50),
        peak_hours: None,
    }
}

/// A zone record with the given id and boundary, active and regular.
#[allow(dead_code)]
pub fn make_zone(id: i64, name: &str, boundary: ZonePolygon) -> ZoneRecord {
    let center = LatLng::new(23.81, 90.41);
    ZoneRecord {
        id,
        name: name.to_string(),
        city_id: 1,
        zone_type: ZoneType::Regular,
        active: true,
        boundary,
        center,
        pricing_multiplier: 1.0,
        demand_multiplier: 1.0,
    }
}

/// Load the checked-in zone fixture.
#[allow(dead_code)]
pub fn load_fixture_zones() -> ZoneService {
    ZoneService::load_from_file("data/zones.geojson")
        .expect("Failed to load zone fixture - is data/ committed?")
}
