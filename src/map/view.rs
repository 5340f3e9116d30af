// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only zone overview map.
//!
//! Renders every zone as a styled polygon, keeps aggregate statistics in
//! step with the zone list, and answers click selection with an info popup.
//! Nothing here mutates zones; editing goes through the drawing session.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::config::EditorConfig;
use crate::geometry;
use crate::map::widget::{style_for, MapWidget, ShapeId};
use crate::models::polygon::LatLng;
use crate::models::stats::ZoneStats;
use crate::models::zone::ZoneRecord;

/// Notification that a zone was selected on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneSelection {
    pub zone_id: i64,
    pub name: String,
    pub center: LatLng,
}

/// Read-only map of all service zones.
pub struct ZoneMapView<W: MapWidget> {
    widget: W,
    zones: Vec<ZoneRecord>,
    /// Rendered shape handle per zone, parallel to `zones`.
    shapes: Vec<(ShapeId, i64)>,
    stats: ZoneStats,
    selected: Option<i64>,
    default_zoom: u8,
}

impl<W: MapWidget> ZoneMapView<W> {
    /// Create an empty view centered on the configured default.
    pub fn new(widget: W, config: &EditorConfig) -> Self {
        let mut view = Self {
            widget,
            zones: Vec::new(),
            shapes: Vec::new(),
            stats: ZoneStats::default(),
            selected: None,
            default_zoom: config.default_zoom,
        };
        view.widget.set_center(config.default_center, view.default_zoom);
        view
    }

    /// Replace the displayed zones.
    ///
    /// Clears the previous polygons and popup, fits the viewport to the
    /// combined bounds of the new zones (when any have geometry), renders
    /// each zone with its type/status style, and recomputes statistics.
    pub fn set_zones(&mut self, zones: Vec<ZoneRecord>) {
        for (shape, _) in self.shapes.drain(..) {
            self.widget.remove_polygon(shape);
        }
        self.widget.close_popup();
        self.selected = None;

        if let Some(bounds) = geometry::combined_bounds(zones.iter().map(|z| &z.boundary)) {
            self.widget.fit_bounds(bounds);
        }

        for zone in &zones {
            let style = style_for(zone.zone_type, zone.active);
            let shape = self.widget.add_polygon(zone.boundary.ring(), &style);
            self.shapes.push((shape, zone.id));
        }

        self.stats = ZoneStats::from_zones(&zones);
        self.zones = zones;
        tracing::debug!(count = self.zones.len(), "Zone map refreshed");
    }

    /// Handle a map-level click: hit-test the zones and select the first
    /// one containing the point. Returns `None` when the click landed
    /// outside every zone.
    pub fn click_at(&mut self, point: LatLng) -> Option<ZoneSelection> {
        let index = self
            .zones
            .iter()
            .position(|zone| geometry::point_in_polygon(point, &zone.boundary))?;
        Some(self.select_index(index, point))
    }

    /// Handle a click reported against a specific rendered polygon.
    ///
    /// Widgets deliver the clicked shape with the click coordinates; when
    /// the coordinates are unusable the popup anchors at the zone's stored
    /// center instead.
    pub fn shape_clicked(&mut self, shape: ShapeId, click: LatLng) -> Option<ZoneSelection> {
        let zone_id = self
            .shapes
            .iter()
            .find(|(s, _)| *s == shape)
            .map(|(_, id)| *id)?;
        let index = self.zones.iter().position(|zone| zone.id == zone_id)?;
        let anchor = if click.is_valid() {
            click
        } else {
            tracing::warn!(
                zone_id,
                "Click with invalid coordinates, anchoring popup at zone center"
            );
            self.zones[index].center
        };
        Some(self.select_index(index, anchor))
    }

    /// Programmatic selection: center the map on the zone and open its
    /// popup at the stored center.
    pub fn select_zone(&mut self, zone_id: i64) -> Option<ZoneSelection> {
        let index = self.zones.iter().position(|zone| zone.id == zone_id)?;
        let center = self.zones[index].center;
        self.widget.set_center(center, self.default_zoom);
        Some(self.select_index(index, center))
    }

    /// Close the popup and drop the selection.
    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.widget.close_popup();
        }
    }

    pub fn zones(&self) -> &[ZoneRecord] {
        &self.zones
    }

    pub fn stats(&self) -> &ZoneStats {
        &self.stats
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    fn select_index(&mut self, index: usize, anchor: LatLng) -> ZoneSelection {
        let zone = &self.zones[index];
        let content = popup_content(zone);
        let selection = ZoneSelection {
            zone_id: zone.id,
            name: zone.name.clone(),
            center: zone.center,
        };
        self.selected = Some(zone.id);
        self.widget.open_popup(anchor, content);
        tracing::debug!(zone_id = selection.zone_id, "Zone selected");
        selection
    }
}

impl<W: MapWidget> Drop for ZoneMapView<W> {
    fn drop(&mut self) {
        for (shape, _) in self.shapes.drain(..) {
            self.widget.remove_polygon(shape);
        }
        self.widget.close_popup();
    }
}

/// Popup body for a zone: name, type/status line, multipliers, and the
/// estimated area.
fn popup_content(zone: &ZoneRecord) -> String {
    let status = if zone.active { "active" } else { "inactive" };
    let area = geometry::estimate_area_km2(&zone.boundary);
    format!(
        "{}\n{} · {}\npricing ×{:.2} · demand ×{:.2}\n≈ {:.2} km²",
        zone.name, zone.zone_type, status, zone.pricing_multiplier, zone.demand_multiplier, area
    )
}
