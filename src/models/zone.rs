// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Service zone models: the stored record, the form payload being
//! validated, and the summary used for cross-zone checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::polygon::{LatLng, ZonePolygon};

/// Service category of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ZoneType {
    Regular,
    Premium,
    Restricted,
}

impl ZoneType {
    pub const ALL: [ZoneType; 3] = [ZoneType::Regular, ZoneType::Premium, ZoneType::Restricted];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Regular => "regular",
            ZoneType::Premium => "premium",
            ZoneType::Restricted => "restricted",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names no known zone type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unknown zone type '{0}' (expected regular, premium, or restricted)")]
pub struct UnknownZoneType(pub String);

impl FromStr for ZoneType {
    type Err = UnknownZoneType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(ZoneType::Regular),
            "premium" => Ok(ZoneType::Premium),
            "restricted" => Ok(ZoneType::Restricted),
            other => Err(UnknownZoneType(other.to_string())),
        }
    }
}

/// Peak-hour windows, one list for weekdays and one for weekends.
///
/// Entries are kept as raw strings (`"07:30-10:00"`); validation happens in
/// the zone validator so the form can hold half-typed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PeakHours {
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(default)]
    pub weekends: Vec<String>,
}

/// The zone create/update form as submitted by the dashboard.
///
/// Every field is optional: partial updates send only what changed, and the
/// validator decides which absences matter. `zone_type` stays a raw string
/// and `boundaries` stays raw GeoJSON so that malformed input reaches the
/// validator instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneInput {
    pub name: Option<String>,
    pub city_id: Option<i64>,
    pub zone_type: Option<String>,
    pub boundaries: Option<geojson::Geometry>,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub pricing_multiplier: Option<f64>,
    pub demand_multiplier: Option<f64>,
    pub min_drivers: Option<i32>,
    pub max_drivers: Option<i32>,
    pub peak_hours: Option<PeakHours>,
}

/// A stored service zone as rendered on the overview map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneRecord {
    pub id: i64,
    pub name: String,
    pub city_id: i64,
    pub zone_type: ZoneType,
    pub active: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<[number, number]>"))]
    pub boundary: ZonePolygon,
    pub center: LatLng,
    pub pricing_multiplier: f64,
    pub demand_multiplier: f64,
}

impl ZoneRecord {
    /// Project down to the summary used for duplicate-name and overlap
    /// checks.
    pub fn summary(&self) -> ZoneSummary {
        ZoneSummary {
            id: self.id,
            name: self.name.clone(),
            city_id: self.city_id,
            boundary: Some(self.boundary.clone()),
        }
    }

    /// Bucket key for per-type statistics.
    pub fn type_key(&self) -> String {
        self.zone_type.to_string()
    }
}

/// The slice of a sibling zone the validator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub id: i64,
    pub name: String,
    pub city_id: i64,
    /// `None` for zones whose boundary failed to load; they are skipped by
    /// geometry checks but still participate in name checks.
    pub boundary: Option<ZonePolygon>,
}
