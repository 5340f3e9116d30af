// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive polygon drawing and editing session.
//!
//! A [`DrawingSurface`] owns one boundary polygon at a time and moves
//! through four phases:
//!
//! 1. `Idle` - nothing on the map
//! 2. `Drawing` - the widget's freehand tool is active
//! 3. `Committed` - a polygon is rendered, not editable
//! 4. `Editing` - one draggable marker per listed ring vertex
//!
//! The embedding forwards widget gestures (sketch finished, marker dragged)
//! into the session and receives [`DrawingEvent`]s back as plain values.
//! Between `begin_editing` and `finish_editing` the ring is mutated one
//! vertex at a time, so dragging only the closing vertex's handle leaves
//! the ring transiently open; the zone validator is the place that
//! catches rings left that way.

use geo::Coord;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::geometry::{self, GeometryError};
use crate::map::widget::{DrawToolId, MapWidget, MarkerId, PolygonStyle, ShapeId};
use crate::models::polygon::{LatLng, ZonePolygon};

/// Initial conditions for a drawing session.
#[derive(Debug, Clone, Default)]
pub struct DrawingOptions {
    /// Initial map center; invalid or missing falls back to the configured
    /// default.
    pub center: Option<LatLng>,
    /// Initial zoom; missing falls back to the configured default.
    pub zoom: Option<u8>,
    /// Polygon to render as committed from the start (editing an existing
    /// zone). An empty polygon is ignored.
    pub initial_polygon: Option<ZonePolygon>,
    /// Read-only sessions render but refuse drawing and editing.
    pub read_only: bool,
}

/// Externally visible phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Drawing,
    Committed,
    Editing,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Drawing => "drawing",
            SessionPhase::Committed => "committed",
            SessionPhase::Editing => "editing",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification returned to the embedding when a polygon lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DrawingEvent {
    /// A freehand sketch was closed and committed.
    PolygonCompleted {
        #[cfg_attr(feature = "binding-generation", ts(type = "Array<[number, number]>"))]
        polygon: ZonePolygon,
        center: LatLng,
    },
    /// An editing session finished.
    PolygonEdited {
        #[cfg_attr(feature = "binding-generation", ts(type = "Array<[number, number]>"))]
        polygon: ZonePolygon,
        center: LatLng,
    },
}

impl DrawingEvent {
    /// The polygon carried by the event, whichever kind it is.
    pub fn polygon(&self) -> &ZonePolygon {
        match self {
            DrawingEvent::PolygonCompleted { polygon, .. } => polygon,
            DrawingEvent::PolygonEdited { polygon, .. } => polygon,
        }
    }
}

/// What the clear hook decided.
pub enum ClearBehavior {
    /// Proceed: remove everything from the map.
    Clear,
    /// Abort: leave the session untouched.
    Keep,
    /// Remove everything, then re-render the given polygon as committed.
    Restore(ZonePolygon),
}

/// Snapshot handed to the clear hook.
#[derive(Debug, Clone)]
pub struct ClearContext {
    pub phase: SessionPhase,
    pub polygon: Option<ZonePolygon>,
}

type ClearHook = Box<dyn FnMut(&ClearContext) -> anyhow::Result<ClearBehavior>>;

enum SessionState {
    Idle,
    Drawing {
        tool: DrawToolId,
    },
    Committed {
        shape: ShapeId,
        polygon: ZonePolygon,
        center: LatLng,
    },
    Editing {
        shape: ShapeId,
        ring: Vec<Coord<f64>>,
        markers: Vec<MarkerId>,
        center: LatLng,
    },
}

/// One-polygon drawing and editing session over an abstract map widget.
pub struct DrawingSurface<W: MapWidget> {
    widget: W,
    state: SessionState,
    read_only: bool,
    default_center: LatLng,
    zoom: u8,
    clear_hook: Option<ClearHook>,
}

impl<W: MapWidget> DrawingSurface<W> {
    /// Set up the session: center the map and render any initial polygon
    /// as committed.
    pub fn new(widget: W, options: DrawingOptions, config: &EditorConfig) -> Self {
        let mut surface = Self {
            widget,
            state: SessionState::Idle,
            read_only: options.read_only,
            default_center: config.default_center,
            zoom: options.zoom.unwrap_or(config.default_zoom),
            clear_hook: None,
        };

        let center = match options.center {
            Some(c) if c.is_valid() => c,
            Some(c) => {
                tracing::warn!(
                    lat = c.lat,
                    lng = c.lng,
                    "Invalid initial map center, using default"
                );
                surface.default_center
            }
            None => surface.default_center,
        };
        surface.widget.set_center(center, surface.zoom);

        if let Some(polygon) = options.initial_polygon {
            surface.render_committed(polygon);
        }
        surface
    }

    /// Install a hook consulted before `clear` removes anything.
    pub fn set_clear_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&ClearContext) -> anyhow::Result<ClearBehavior> + 'static,
    {
        self.clear_hook = Some(Box::new(hook));
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Drawing { .. } => SessionPhase::Drawing,
            SessionState::Committed { .. } => SessionPhase::Committed,
            SessionState::Editing { .. } => SessionPhase::Editing,
        }
    }

    /// The current polygon, if one is committed or being edited. During
    /// editing this is the live ring, which may be transiently open.
    pub fn polygon(&self) -> Option<ZonePolygon> {
        match &self.state {
            SessionState::Committed { polygon, .. } => Some(polygon.clone()),
            SessionState::Editing { ring, .. } => Some(ZonePolygon::from_ring(ring.clone())),
            _ => None,
        }
    }

    /// The current polygon's vertex-mean center.
    pub fn center(&self) -> Option<LatLng> {
        match &self.state {
            SessionState::Committed { center, .. } => Some(*center),
            SessionState::Editing { center, .. } => Some(*center),
            _ => None,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Activate the widget's freehand tool. Only valid while idle.
    pub fn start_drawing(&mut self) -> Result<(), EditorError> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }
        if !matches!(self.state, SessionState::Idle) {
            return Err(self.invalid("start_drawing"));
        }
        let tool = self.widget.begin_draw();
        self.state = SessionState::Drawing { tool };
        tracing::debug!("Polygon drawing started");
        Ok(())
    }

    /// Accept the finished sketch from the widget.
    ///
    /// The path arrives without the closing vertex; it is closed here, then
    /// rendered as a committed (non-editable) polygon. A sketch with fewer
    /// than three vertices ends the drawing phase with an error and nothing
    /// committed.
    pub fn draw_completed(&mut self, path: Vec<Coord<f64>>) -> Result<DrawingEvent, EditorError> {
        let tool = match &self.state {
            SessionState::Drawing { tool } => *tool,
            _ => return Err(self.invalid("draw_completed")),
        };
        self.widget.end_draw(tool);
        self.state = SessionState::Idle;

        if path.len() < 3 {
            return Err(EditorError::Geometry(GeometryError::TooFewPoints(
                path.len(),
            )));
        }

        let polygon = ZonePolygon::from_unclosed_path(path);
        let center = geometry::centroid(&polygon).unwrap_or(self.default_center);
        let shape = self
            .widget
            .add_polygon(polygon.ring(), &PolygonStyle::default());
        self.state = SessionState::Committed {
            shape,
            polygon: polygon.clone(),
            center,
        };
        tracing::debug!(vertices = polygon.len(), "Polygon committed from sketch");
        Ok(DrawingEvent::PolygonCompleted { polygon, center })
    }

    /// Abandon an in-progress sketch without committing anything.
    pub fn cancel_drawing(&mut self) -> Result<(), EditorError> {
        let tool = match &self.state {
            SessionState::Drawing { tool } => *tool,
            _ => return Err(self.invalid("cancel_drawing")),
        };
        self.widget.end_draw(tool);
        self.state = SessionState::Idle;
        tracing::debug!("Polygon drawing cancelled");
        Ok(())
    }

    /// Switch the committed polygon into vertex editing.
    ///
    /// One draggable marker is created per listed ring vertex. The closing
    /// duplicate gets its own marker, matching what the form has always
    /// shown; dragging only that handle is how rings end up open.
    pub fn begin_editing(&mut self) -> Result<(), EditorError> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        match state {
            SessionState::Committed {
                shape,
                polygon,
                center,
            } => {
                let markers = polygon
                    .ring()
                    .iter()
                    .map(|c| self.widget.add_vertex_marker(LatLng::from_coord(*c)))
                    .collect::<Vec<_>>();
                tracing::debug!(handles = markers.len(), "Vertex editing started");
                self.state = SessionState::Editing {
                    shape,
                    ring: polygon.into_ring(),
                    markers,
                    center,
                };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("begin_editing"))
            }
        }
    }

    /// Apply a vertex drag reported by the widget.
    ///
    /// Exactly one ring index changes; the rendered polygon, the dragged
    /// marker, and the running center all update immediately. No geometry
    /// checks run here.
    pub fn vertex_dragged(&mut self, index: usize, to: LatLng) -> Result<(), EditorError> {
        if self.read_only {
            return Err(EditorError::ReadOnly);
        }
        let SessionState::Editing {
            shape,
            ring,
            markers,
            center,
        } = &mut self.state
        else {
            return Err(self.invalid("vertex_dragged"));
        };
        if index >= ring.len() {
            return Err(EditorError::VertexOutOfRange {
                index,
                len: ring.len(),
            });
        }
        ring[index] = to.to_coord();
        let shape = *shape;
        let marker = markers[index];
        *center = geometry::ring_centroid(ring).unwrap_or(*center);
        let snapshot = ring.clone();
        self.widget.update_polygon(shape, &snapshot);
        self.widget.move_vertex_marker(marker, to);
        tracing::trace!(index, "Vertex dragged");
        Ok(())
    }

    /// Leave editing: remove the vertex markers and commit the ring as it
    /// stands, closed or not.
    pub fn finish_editing(&mut self) -> Result<DrawingEvent, EditorError> {
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        match state {
            SessionState::Editing {
                shape,
                ring,
                markers,
                center,
            } => {
                for marker in markers {
                    self.widget.remove_vertex_marker(marker);
                }
                let polygon = ZonePolygon::from_ring(ring);
                self.state = SessionState::Committed {
                    shape,
                    polygon: polygon.clone(),
                    center,
                };
                tracing::debug!(
                    vertices = polygon.len(),
                    closed = polygon.is_closed(),
                    "Vertex editing finished"
                );
                Ok(DrawingEvent::PolygonEdited { polygon, center })
            }
            other => {
                self.state = other;
                Err(self.invalid("finish_editing"))
            }
        }
    }

    /// Remove everything from the map and return to idle.
    ///
    /// When a clear hook is installed it runs first and may keep the
    /// current state or substitute a polygon to restore. Clearing an idle
    /// session is a no-op.
    pub fn clear(&mut self) -> Result<(), EditorError> {
        if matches!(self.state, SessionState::Idle) {
            return Ok(());
        }
        let context = ClearContext {
            phase: self.phase(),
            polygon: self.polygon(),
        };
        let behavior = if let Some(mut hook) = self.clear_hook.take() {
            let decision = hook(&context);
            self.clear_hook = Some(hook);
            decision?
        } else {
            ClearBehavior::Clear
        };

        match behavior {
            ClearBehavior::Keep => Ok(()),
            ClearBehavior::Clear => {
                self.teardown_state();
                tracing::debug!("Drawing session cleared");
                Ok(())
            }
            ClearBehavior::Restore(polygon) => {
                self.teardown_state();
                self.render_committed(polygon);
                tracing::debug!("Drawing session restored previous polygon");
                Ok(())
            }
        }
    }

    /// Replace the session's polygon from outside (form edits, undo).
    ///
    /// Any in-progress drawing or editing is torn down first. `None` or an
    /// empty polygon leaves the session idle. No event is returned: pushes
    /// from the embedding must not echo back and cause update loops.
    pub fn set_polygon(&mut self, polygon: Option<ZonePolygon>) {
        self.teardown_state();
        match polygon {
            Some(p) => {
                self.render_committed(p);
                tracing::debug!("Polygon replaced externally");
            }
            None => tracing::debug!("Polygon cleared externally"),
        }
    }

    /// Re-center the map, keeping the session zoom. Invalid coordinates
    /// fall back to the configured default center.
    pub fn set_center(&mut self, center: LatLng) {
        let center = if center.is_valid() {
            center
        } else {
            tracing::warn!(
                lat = center.lat,
                lng = center.lng,
                "Invalid map center, using default"
            );
            self.default_center
        };
        self.widget.set_center(center, self.zoom);
    }

    /// Remove all session objects from the widget. Also runs on drop.
    pub fn teardown(&mut self) {
        self.teardown_state();
    }

    fn render_committed(&mut self, polygon: ZonePolygon) {
        if polygon.is_empty() {
            tracing::warn!("Ignoring empty polygon");
            return;
        }
        let center = geometry::centroid(&polygon).unwrap_or(self.default_center);
        let shape = self
            .widget
            .add_polygon(polygon.ring(), &PolygonStyle::default());
        self.state = SessionState::Committed {
            shape,
            polygon,
            center,
        };
    }

    fn teardown_state(&mut self) {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Idle => {}
            SessionState::Drawing { tool } => self.widget.end_draw(tool),
            SessionState::Committed { shape, .. } => self.widget.remove_polygon(shape),
            SessionState::Editing {
                shape, markers, ..
            } => {
                for marker in markers {
                    self.widget.remove_vertex_marker(marker);
                }
                self.widget.remove_polygon(shape);
            }
        }
    }

    fn invalid(&self, action: &'static str) -> EditorError {
        EditorError::InvalidTransition {
            from: self.phase().as_str(),
            action,
        }
    }
}

impl<W: MapWidget> Drop for DrawingSurface<W> {
    fn drop(&mut self) {
        self.teardown_state();
    }
}
