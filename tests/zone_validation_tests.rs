// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validation tests for payloads that carry boundary geometry.
//!
//! The unit tests in `services::validation` cover the field checks; these
//! exercise the geometry-dependent paths against the bundled fixture zones:
//! structural ring errors, area advisories, and overlap screening.

mod common;

use common::{load_fixture_zones, square_geometry, valid_zone_input};
use zone_editor::services::{validate_create, validate_update};

fn polygon_geometry(positions: Vec<Vec<f64>>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::Polygon(vec![positions]))
}

#[test]
fn test_full_payload_with_boundary_is_clean() {
    common::init_test_logging();
    let result = validate_create(&valid_zone_input(), &[]);
    assert!(result.is_valid, "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
}

#[test]
fn test_broken_ring_reports_every_problem() {
    let mut input = valid_zone_input();
    // Open ring with a longitude far outside the valid range.
    input.boundaries = Some(polygon_geometry(vec![
        vec![200.0, 23.80],
        vec![90.42, 23.80],
        vec![90.42, 23.82],
        vec![90.40, 23.82],
    ]));
    let existing = load_fixture_zones().summaries();
    let result = validate_create(&input, &existing);

    assert!(!result.is_valid);
    assert!(result.errors.contains(
        &"Zone boundary ring is not closed (first and last points differ)".to_string()
    ));
    assert!(result
        .errors
        .contains(&"Longitude 200 at position 0 is outside [-180, 180]".to_string()));
    assert!(
        result.warnings.is_empty(),
        "broken rings must not produce area/overlap advisories: {:?}",
        result.warnings
    );
}

#[test]
fn test_short_open_ring_reports_both_errors() {
    let mut input = valid_zone_input();
    input.boundaries = Some(polygon_geometry(vec![
        vec![90.40, 23.80],
        vec![90.42, 23.80],
        vec![90.42, 23.82],
    ]));
    let result = validate_create(&input, &[]);

    assert!(result
        .errors
        .contains(&"Zone boundary ring must have at least 4 points, got 3".to_string()));
    assert!(result.errors.contains(
        &"Zone boundary ring is not closed (first and last points differ)".to_string()
    ));
}

#[test]
fn test_non_polygon_boundary_is_rejected() {
    let mut input = valid_zone_input();
    input.boundaries = Some(geojson::Geometry::new(geojson::Value::Point(vec![
        90.41, 23.80,
    ])));
    let result = validate_create(&input, &[]);
    assert!(result
        .errors
        .contains(&"Zone boundary must be a GeoJSON Polygon, got Point".to_string()));
}

#[test]
fn test_malformed_position_is_reported_by_index() {
    let mut input = valid_zone_input();
    input.boundaries = Some(polygon_geometry(vec![
        vec![90.40, 23.80],
        vec![90.42, 23.80],
        vec![90.42],
        vec![90.40, 23.80],
    ]));
    let result = validate_create(&input, &[]);
    assert_eq!(
        result.errors,
        vec!["Coordinate at position 2 must be a [lng, lat] pair".to_string()]
    );
}

#[test]
fn test_missing_boundary_is_allowed() {
    let mut input = valid_zone_input();
    input.boundaries = None;
    let result = validate_create(&input, &[]);
    assert!(result.is_valid, "errors: {:?}", result.errors);
}

#[test]
fn test_tiny_zone_gets_area_warning() {
    let mut input = valid_zone_input();
    input.boundaries = Some(square_geometry(90.40, 23.80, 0.002));
    let result = validate_create(&input, &[]);

    assert!(result.is_valid, "area advisories never block");
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.starts_with("Zone is very small (")),
        "warnings: {:?}",
        result.warnings
    );
}

#[test]
fn test_huge_zone_gets_area_warning() {
    let mut input = valid_zone_input();
    input.boundaries = Some(square_geometry(90.0, 23.5, 0.5));
    let result = validate_create(&input, &[]);

    assert!(result.is_valid, "area advisories never block");
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.starts_with("Zone is very large (")),
        "warnings: {:?}",
        result.warnings
    );
}

#[test]
fn test_overlap_warning_counts_existing_zones() {
    let mut input = valid_zone_input();
    // Straddles the Gulshan/Banani boundary in the fixture, far from Uttara.
    input.boundaries = Some(square_geometry(90.41, 23.79, 0.02));
    let existing = load_fixture_zones().summaries();
    let result = validate_create(&input, &existing);

    assert!(result.is_valid, "overlap is advisory: {:?}", result.errors);
    assert!(result
        .warnings
        .contains(&"Zone boundary overlaps 2 existing zone(s)".to_string()));
}

#[test]
fn test_update_overlap_skips_the_zone_being_edited() {
    let mut input = valid_zone_input();
    input.name = Some("Gulshan".to_string());
    input.boundaries = Some(square_geometry(90.41, 23.79, 0.02));
    let existing = load_fixture_zones().summaries();
    let result = validate_update(&input, &existing, Some(1));

    assert!(
        result.is_valid,
        "own record must not count as duplicate: {:?}",
        result.errors
    );
    assert!(result
        .warnings
        .contains(&"Zone boundary overlaps 1 existing zone(s)".to_string()));
}

#[test]
fn test_duplicate_name_against_fixture_zones() {
    let mut input = valid_zone_input();
    input.name = Some("gulshan".to_string());
    let existing = load_fixture_zones().summaries();
    let result = validate_create(&input, &existing);

    assert!(!result.is_valid);
    assert!(result
        .errors
        .contains(&"A zone with this name already exists in this city".to_string()));
}

#[test]
fn test_warnings_alone_do_not_block() {
    let mut input = valid_zone_input();
    input.pricing_multiplier = Some(4.0);
    input.boundaries = Some(square_geometry(90.41, 23.79, 0.02));
    let existing = load_fixture_zones().summaries();
    let result = validate_create(&input, &existing);

    assert!(result.is_valid, "errors: {:?}", result.errors);
    assert!(result.warnings.len() >= 2, "warnings: {:?}", result.warnings);
}
