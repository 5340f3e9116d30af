// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone loading, export, and overlap-query tests against the bundled fixture.

mod common;

use common::{closed_square, load_fixture_zones};
use zone_editor::models::{LatLng, ZoneType};
use zone_editor::services::{ZoneLoadError, ZoneService};

#[test]
fn test_fixture_loads_three_zones() {
    common::init_test_logging();
    let service = load_fixture_zones();
    let zones = service.zones();

    // The draft feature has no numeric id and must be skipped.
    assert_eq!(zones.len(), 3, "expected 3 zones, got {}", zones.len());
    assert_eq!(zones[0].name, "Gulshan");
    assert_eq!(zones[1].name, "Banani");
    assert_eq!(zones[2].name, "Uttara");
    assert_eq!(zones[0].zone_type, ZoneType::Regular);
    assert_eq!(zones[1].zone_type, ZoneType::Premium);
    assert_eq!(zones[2].zone_type, ZoneType::Restricted);
    assert!(zones[0].active && zones[1].active);
    assert!(!zones[2].active, "Uttara is flagged inactive in the fixture");
}

#[test]
fn test_stored_center_wins_over_vertex_mean() {
    let service = load_fixture_zones();
    let gulshan = &service.zones()[0];
    assert_eq!(gulshan.center, LatLng::new(23.7925, 90.415));
}

#[test]
fn test_center_falls_back_to_vertex_mean() {
    let service = load_fixture_zones();
    let banani = &service.zones()[1];
    // No stored center in the fixture; the mean includes the closing vertex.
    assert!((banani.center.lat - 23.801).abs() < 1e-9, "lat {}", banani.center.lat);
    assert!((banani.center.lng - 90.428).abs() < 1e-9, "lng {}", banani.center.lng);
}

#[test]
fn test_multipliers_parsed() {
    let service = load_fixture_zones();
    let gulshan = &service.zones()[0];
    assert_eq!(gulshan.pricing_multiplier, 1.2);
    assert_eq!(gulshan.demand_multiplier, 1.1);
}

#[test]
fn test_find_bbox_overlaps() {
    let service = load_fixture_zones();
    let candidate = closed_square(90.41, 23.79, 0.02);

    assert_eq!(service.find_bbox_overlaps(&candidate, None), vec![1, 2]);
    assert_eq!(service.find_bbox_overlaps(&candidate, Some(1)), vec![2]);

    let far_away = closed_square(91.50, 24.50, 0.02);
    assert!(service.find_bbox_overlaps(&far_away, None).is_empty());
}

#[test]
fn test_export_round_trips_through_geojson() {
    let service = load_fixture_zones();
    let collection = service.to_feature_collection();
    assert_eq!(collection.features.len(), 3);

    let json = serde_json::to_string(&collection).expect("collection serializes");
    let reloaded = ZoneService::load_from_json(&json).expect("exported JSON loads back");

    assert_eq!(reloaded.zones().len(), 3);
    for (original, round_tripped) in service.zones().iter().zip(reloaded.zones()) {
        assert_eq!(original.id, round_tripped.id);
        assert_eq!(original.name, round_tripped.name);
        assert_eq!(original.zone_type, round_tripped.zone_type);
        assert_eq!(original.active, round_tripped.active);
        assert_eq!(original.boundary, round_tripped.boundary);
        assert_eq!(original.center, round_tripped.center, "export stores the center");
    }
}

#[test]
fn test_defaults_for_missing_properties() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "id": 9 },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
            }
        }]
    }"#;
    let service = ZoneService::load_from_json(json).expect("minimal feature loads");
    let zone = &service.zones()[0];

    assert_eq!(zone.name, "Unknown");
    assert_eq!(zone.city_id, 0);
    assert_eq!(zone.zone_type, ZoneType::Regular);
    assert!(zone.active);
    assert_eq!(zone.pricing_multiplier, 1.0);
    assert_eq!(zone.demand_multiplier, 1.0);
    // Vertex mean over all four listed points.
    assert_eq!(zone.center, LatLng::new(0.25, 0.5));
}

#[test]
fn test_unknown_zone_type_falls_back_to_regular() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "id": 4, "zone_type": "luxury" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
            }
        }]
    }"#;
    let service = ZoneService::load_from_json(json).expect("feature loads");
    assert_eq!(service.zones()[0].zone_type, ZoneType::Regular);
}

#[test]
fn test_feature_without_geometry_is_skipped() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "id": 5, "name": "No shape" },
            "geometry": null
        }]
    }"#;
    let service = ZoneService::load_from_json(json).expect("collection loads");
    assert!(service.zones().is_empty());
}

#[test]
fn test_line_geometry_is_unsupported() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "id": 6 },
            "geometry": {
                "type": "LineString",
                "coordinates": [[0.0, 0.0], [1.0, 1.0]]
            }
        }]
    }"#;
    let err = ZoneService::load_from_json(json).expect_err("line strings are not zones");
    assert!(matches!(err, ZoneLoadError::UnsupportedGeometry));
}

#[test]
fn test_garbage_is_a_parse_error() {
    let err = ZoneService::load_from_json("not geojson at all").expect_err("must not parse");
    assert!(matches!(err, ZoneLoadError::ParseError(_)));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = ZoneService::load_from_file("data/does_not_exist.geojson")
        .expect_err("file is absent");
    assert!(matches!(err, ZoneLoadError::IoError(_)));
    assert!(err.to_string().starts_with("Failed to read file:"));
}

#[test]
fn test_bare_geometry_document_yields_no_zones() {
    let json = r#"{
        "type": "Polygon",
        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
    }"#;
    let service = ZoneService::load_from_json(json).expect("valid GeoJSON parses");
    assert!(service.zones().is_empty());
}
