// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone loading and bounding-box overlap queries.

use crate::geometry;
use crate::models::polygon::{LatLng, ZonePolygon};
use crate::models::zone::{ZoneRecord, ZoneSummary, ZoneType};
use geojson::GeoJson;
use std::fs;
use std::path::Path;

/// Service for loading zones and answering cross-zone geometry queries.
#[derive(Debug, Default, Clone)]
pub struct ZoneService {
    zones: Vec<ZoneRecord>,
}

impl ZoneService {
    /// Load zones from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ZoneLoadError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| ZoneLoadError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load zones from a GeoJSON string.
    ///
    /// Boundary rings are taken as-is; structural ring validation is a form
    /// concern, not a display concern, so a lopsided ring still renders.
    pub fn load_from_json(json_data: &str) -> Result<Self, ZoneLoadError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| ZoneLoadError::ParseError(e.to_string()))?;

        let mut zones = Vec::new();

        if let GeoJson::FeatureCollection(collection) = geojson {
            for feature in collection.features {
                let Some(id) = feature.property("id").and_then(|v| v.as_i64()) else {
                    // A zone without an ID cannot be selected or edited.
                    tracing::warn!("Skipping zone feature with no numeric id");
                    continue;
                };

                let name = feature
                    .property("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown")
                    .to_string();

                let city_id = feature
                    .property("city_id")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0);

                // Unknown type strings render as regular zones.
                let zone_type = feature
                    .property("zone_type")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse::<ZoneType>().ok())
                    .unwrap_or(ZoneType::Regular);

                let active = feature
                    .property("active")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(true);

                let pricing_multiplier = feature
                    .property("pricing_multiplier")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(1.0);

                let demand_multiplier = feature
                    .property("demand_multiplier")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(1.0);

                let Some(geom) = &feature.geometry else {
                    tracing::warn!(zone_id = id, "Skipping zone feature with no geometry");
                    continue;
                };
                let boundary = Self::convert_boundary(geom)?;
                if boundary.is_empty() {
                    tracing::warn!(zone_id = id, "Skipping zone with an empty boundary ring");
                    continue;
                }

                // Stored center wins; otherwise fall back to the vertex mean.
                let center = match (
                    feature.property("center_lat").and_then(|v| v.as_f64()),
                    feature.property("center_lng").and_then(|v| v.as_f64()),
                ) {
                    (Some(lat), Some(lng)) => LatLng::new(lat, lng),
                    _ => geometry::centroid(&boundary).unwrap_or_default(),
                };

                zones.push(ZoneRecord {
                    id,
                    name,
                    city_id,
                    zone_type,
                    active,
                    boundary,
                    center,
                    pricing_multiplier,
                    demand_multiplier,
                });
            }
        }

        tracing::info!(count = zones.len(), "Loaded service zones");
        Ok(Self { zones })
    }

    /// Extract the outer ring from a feature geometry.
    fn convert_boundary(geometry: &geojson::Geometry) -> Result<ZonePolygon, ZoneLoadError> {
        match ZonePolygon::from_geojson_lenient(geometry) {
            Some(polygon) => Ok(polygon),
            None => Err(ZoneLoadError::UnsupportedGeometry),
        }
    }

    /// Get the list of zones.
    pub fn zones(&self) -> &[ZoneRecord] {
        &self.zones
    }

    /// Summaries for duplicate-name and overlap validation.
    pub fn summaries(&self) -> Vec<ZoneSummary> {
        self.zones.iter().map(ZoneRecord::summary).collect()
    }

    /// IDs of zones whose bounding boxes overlap the given boundary,
    /// optionally excluding the zone being edited.
    pub fn find_bbox_overlaps(&self, polygon: &ZonePolygon, exclude_id: Option<i64>) -> Vec<i64> {
        self.zones
            .iter()
            .filter(|zone| exclude_id != Some(zone.id))
            .filter(|zone| geometry::bounding_boxes_overlap(polygon, &zone.boundary))
            .map(|zone| zone.id)
            .collect()
    }

    /// Export all zones as a GeoJSON FeatureCollection.
    pub fn to_feature_collection(&self) -> geojson::FeatureCollection {
        let features = self
            .zones
            .iter()
            .map(|zone| {
                let mut properties = geojson::JsonObject::new();
                properties.insert("id".to_string(), zone.id.into());
                properties.insert("name".to_string(), zone.name.clone().into());
                properties.insert("city_id".to_string(), zone.city_id.into());
                properties.insert("zone_type".to_string(), zone.zone_type.as_str().into());
                properties.insert("active".to_string(), zone.active.into());
                properties.insert(
                    "pricing_multiplier".to_string(),
                    zone.pricing_multiplier.into(),
                );
                properties.insert(
                    "demand_multiplier".to_string(),
                    zone.demand_multiplier.into(),
                );
                properties.insert("center_lat".to_string(), zone.center.lat.into());
                properties.insert("center_lng".to_string(), zone.center.lng.into());

                geojson::Feature {
                    bbox: None,
                    geometry: Some(zone.boundary.to_geojson()),
                    id: Some(geojson::feature::Id::Number(zone.id.into())),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

/// Errors from zone loading.
#[derive(Debug, thiserror::Error)]
pub enum ZoneLoadError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Unsupported geometry type (expected Polygon)")]
    UnsupportedGeometry,
}
