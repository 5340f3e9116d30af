// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone configuration validation.
//!
//! One pass over a [`ZoneInput`] produces a [`ValidationResult`] with every
//! blocking error and advisory warning, never just the first. All checks are
//! presence-based: an absent field is skipped (only the zone name is
//! required, and only on create), so partial update payloads validate
//! cleanly.
//!
//! Duplicate names within a city are a hard error. Geometry advisories
//! (area, overlap) run only when the boundary passed structural validation,
//! so a broken ring reports its structural problems without noise.

use crate::geometry::{self, validate_closed_ring};
use crate::models::polygon::ZonePolygon;
use crate::models::validation::ValidationResult;
use crate::models::zone::{ZoneInput, ZoneSummary, ZoneType};
use crate::time_utils::is_valid_time_range;

/// Maximum zone name length in characters.
pub const NAME_MAX_CHARS: usize = 100;
/// Valid range for pricing and demand multipliers.
pub const MULTIPLIER_MIN: f64 = 0.5;
pub const MULTIPLIER_MAX: f64 = 10.0;

const PRICING_HIGH_WARNING: f64 = 3.0;
const PRICING_LOW_WARNING: f64 = 0.7;
const DEMAND_HIGH_WARNING: f64 = 2.5;
const NARROW_DRIVER_RANGE: i32 = 5;
const SMALL_AREA_KM2: f64 = 0.1;
const LARGE_AREA_KM2: f64 = 100.0;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Create,
    Update,
}

/// Validate a full create payload. The name is required; everything else is
/// checked only when present.
pub fn validate_create(input: &ZoneInput, existing: &[ZoneSummary]) -> ValidationResult {
    validate(input, existing, None, Mode::Create)
}

/// Validate a partial update payload. `exclude_id` is the zone being edited,
/// which is skipped by the duplicate-name and overlap checks.
pub fn validate_update(
    input: &ZoneInput,
    existing: &[ZoneSummary],
    exclude_id: Option<i64>,
) -> ValidationResult {
    validate(input, existing, exclude_id, Mode::Update)
}

fn validate(
    input: &ZoneInput,
    existing: &[ZoneSummary],
    exclude_id: Option<i64>,
    mode: Mode,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    check_name(input, existing, exclude_id, mode, &mut result);
    check_city_id(input, &mut result);
    check_zone_type(input, &mut result);
    check_boundary(input, existing, exclude_id, &mut result);
    check_center(input, &mut result);
    check_multipliers(input, &mut result);
    check_drivers(input, &mut result);
    check_peak_hours(input, &mut result);

    tracing::debug!(
        valid = result.is_valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Zone input validated"
    );
    result
}

fn check_name(
    input: &ZoneInput,
    existing: &[ZoneSummary],
    exclude_id: Option<i64>,
    mode: Mode,
    result: &mut ValidationResult,
) {
    match &input.name {
        Some(name) => {
            if name.trim().is_empty() {
                result.push_error("Zone name cannot be empty");
            } else if name.chars().count() > NAME_MAX_CHARS {
                result.push_error(format!(
                    "Zone name must be {} characters or less",
                    NAME_MAX_CHARS
                ));
            }
        }
        None if mode == Mode::Create => result.push_error("Zone name is required"),
        None => {}
    }

    // Case-insensitive duplicate check, scoped to the city. Needs both the
    // name and the city to be present in the payload.
    if let (Some(name), Some(city_id)) = (&input.name, input.city_id) {
        let lowered = name.to_lowercase();
        let duplicate = existing
            .iter()
            .filter(|zone| exclude_id != Some(zone.id))
            .any(|zone| zone.city_id == city_id && zone.name.to_lowercase() == lowered);
        if duplicate {
            result.push_error("A zone with this name already exists in this city");
        }
    }
}

fn check_city_id(input: &ZoneInput, result: &mut ValidationResult) {
    if let Some(city_id) = input.city_id {
        if city_id <= 0 {
            result.push_error("City ID must be a positive number");
        }
    }
}

fn check_zone_type(input: &ZoneInput, result: &mut ValidationResult) {
    if let Some(raw) = &input.zone_type {
        if let Err(err) = raw.parse::<ZoneType>() {
            result.push_error(err.to_string());
        }
    }
}

fn check_boundary(
    input: &ZoneInput,
    existing: &[ZoneSummary],
    exclude_id: Option<i64>,
    result: &mut ValidationResult,
) {
    let Some(boundary) = &input.boundaries else {
        return;
    };
    result.merge(validate_closed_ring(Some(boundary)));

    // Advisories only make sense on a structurally sound ring.
    let Ok(polygon) = ZonePolygon::from_geojson(Some(boundary)) else {
        return;
    };
    let area = geometry::estimate_area_km2(&polygon);
    if area < SMALL_AREA_KM2 {
        result.push_warning(format!(
            "Zone is very small ({:.3} km²) and may be hard to manage",
            area
        ));
    } else if area > LARGE_AREA_KM2 {
        result.push_warning(format!(
            "Zone is very large ({:.1} km²); consider splitting it",
            area
        ));
    }

    let overlaps = existing
        .iter()
        .filter(|zone| exclude_id != Some(zone.id))
        .filter(|zone| {
            zone.boundary
                .as_ref()
                .is_some_and(|other| geometry::bounding_boxes_overlap(&polygon, other))
        })
        .count();
    if overlaps > 0 {
        result.push_warning(format!(
            "Zone boundary overlaps {} existing zone(s)",
            overlaps
        ));
    }
}

fn check_center(input: &ZoneInput, result: &mut ValidationResult) {
    if let Some(lat) = input.center_lat {
        if !(-90.0..=90.0).contains(&lat) {
            result.push_error("Center latitude must be between -90 and 90");
        }
    }
    if let Some(lng) = input.center_lng {
        if !(-180.0..=180.0).contains(&lng) {
            result.push_error("Center longitude must be between -180 and 180");
        }
    }
}

fn check_multipliers(input: &ZoneInput, result: &mut ValidationResult) {
    if let Some(pricing) = input.pricing_multiplier {
        if !(MULTIPLIER_MIN..=MULTIPLIER_MAX).contains(&pricing) {
            result.push_error(format!(
                "Pricing multiplier must be between {} and {}",
                MULTIPLIER_MIN, MULTIPLIER_MAX
            ));
        }
        if pricing > PRICING_HIGH_WARNING {
            result.push_warning(format!(
                "Pricing multiplier above {} may suppress rider demand",
                PRICING_HIGH_WARNING
            ));
        } else if pricing < PRICING_LOW_WARNING {
            result.push_warning(format!(
                "Pricing multiplier below {} may hurt margins",
                PRICING_LOW_WARNING
            ));
        }
    }
    if let Some(demand) = input.demand_multiplier {
        if !(MULTIPLIER_MIN..=MULTIPLIER_MAX).contains(&demand) {
            result.push_error(format!(
                "Demand multiplier must be between {} and {}",
                MULTIPLIER_MIN, MULTIPLIER_MAX
            ));
        }
        if demand > DEMAND_HIGH_WARNING {
            result.push_warning(format!(
                "Demand multiplier above {} is unusually high",
                DEMAND_HIGH_WARNING
            ));
        }
    }
}

fn check_drivers(input: &ZoneInput, result: &mut ValidationResult) {
    if let Some(min) = input.min_drivers {
        if min < 0 {
            result.push_error("Minimum drivers cannot be negative");
        }
    }
    if let Some(max) = input.max_drivers {
        if max <= 0 {
            result.push_error("Maximum drivers must be greater than 0");
        }
    }
    if let (Some(min), Some(max)) = (input.min_drivers, input.max_drivers) {
        if min > max {
            result.push_error("Minimum drivers cannot exceed maximum drivers");
        } else if max - min < NARROW_DRIVER_RANGE {
            result.push_warning(format!(
                "Driver range is narrower than {}; consider widening it",
                NARROW_DRIVER_RANGE
            ));
        }
    }
}

fn check_peak_hours(input: &ZoneInput, result: &mut ValidationResult) {
    if let Some(peak_hours) = &input.peak_hours {
        check_time_ranges("Weekday", &peak_hours.weekdays, result);
        check_time_ranges("Weekend", &peak_hours.weekends, result);
    }

    // Premium zones are expected to carry surge windows.
    let is_premium = input
        .zone_type
        .as_deref()
        .is_some_and(|raw| raw.parse::<ZoneType>() == Ok(ZoneType::Premium));
    if is_premium && input.peak_hours.is_none() {
        result.push_warning("Premium zones should define peak hours");
    }
}

fn check_time_ranges(label: &str, entries: &[String], result: &mut ValidationResult) {
    for (index, entry) in entries.iter().enumerate() {
        if !is_valid_time_range(entry) {
            result.push_error(format!(
                "{} peak hours entry {} is not a valid HH:MM-HH:MM range: '{}'",
                label,
                index + 1,
                entry
            ));
        }
    }
}
