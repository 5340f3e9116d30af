// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for zones, boundaries, and validation results.

pub mod polygon;
pub mod stats;
pub mod validation;
pub mod zone;

pub use polygon::{LatLng, ZonePolygon};
pub use stats::ZoneStats;
pub use validation::ValidationResult;
pub use zone::{PeakHours, UnknownZoneType, ZoneInput, ZoneRecord, ZoneSummary, ZoneType};
