// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Abstract map widget surface.
//!
//! The drawing session and zone view never talk to a concrete map SDK.
//! They issue imperative calls against [`MapWidget`], and an embedding
//! (web view, desktop shell) forwards them to whatever map it hosts.
//! [`MockWidget`] is the reference implementation used by the test suite;
//! it records every call and tracks which shapes, markers, and draw tools
//! are currently alive.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use geo::{Coord, Rect};

use crate::models::polygon::LatLng;
use crate::models::zone::ZoneType;

/// Handle to a polygon shape rendered on the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u64);

/// Handle to a draggable vertex marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Handle to an active freehand drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawToolId(pub u64);

/// Visual styling for a rendered polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyle {
    pub stroke_color: String,
    pub stroke_weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for PolygonStyle {
    /// The editor's working-polygon look: blue outline, light fill.
    fn default() -> Self {
        Self {
            stroke_color: "#2196F3".to_string(),
            stroke_weight: 2.0,
            fill_color: "#2196F3".to_string(),
            fill_opacity: 0.25,
        }
    }
}

/// Display style for a stored zone on the overview map.
///
/// Inactive zones are grey regardless of type; active zones are colored by
/// type (blue regular, amber premium, red restricted).
pub fn style_for(zone_type: ZoneType, active: bool) -> PolygonStyle {
    if !active {
        return PolygonStyle {
            stroke_color: "#9E9E9E".to_string(),
            stroke_weight: 1.5,
            fill_color: "#BDBDBD".to_string(),
            fill_opacity: 0.15,
        };
    }
    let color = match zone_type {
        ZoneType::Regular => "#2196F3",
        ZoneType::Premium => "#FFC107",
        ZoneType::Restricted => "#F44336",
    };
    PolygonStyle {
        stroke_color: color.to_string(),
        stroke_weight: 2.0,
        fill_color: color.to_string(),
        fill_opacity: 0.3,
    }
}

/// Imperative surface the editor drives. One widget per map instance.
///
/// Shapes added through `add_polygon` are rendered non-interactive; vertex
/// editing happens exclusively through markers managed by the caller. All
/// methods take `&mut self`: the editor is single-threaded and every call
/// mutates widget state.
pub trait MapWidget {
    /// Re-center the map.
    fn set_center(&mut self, center: LatLng, zoom: u8);

    /// Zoom/pan so the given degree-space bounds are fully visible.
    fn fit_bounds(&mut self, bounds: Rect<f64>);

    /// Activate the freehand polygon drawing tool.
    fn begin_draw(&mut self) -> DrawToolId;

    /// Deactivate a drawing tool, whether it finished or was abandoned.
    fn end_draw(&mut self, tool: DrawToolId);

    /// Render a polygon ring (x = lng, y = lat). Returns its handle.
    fn add_polygon(&mut self, ring: &[Coord<f64>], style: &PolygonStyle) -> ShapeId;

    /// Replace the ring of an existing polygon in place.
    fn update_polygon(&mut self, shape: ShapeId, ring: &[Coord<f64>]);

    /// Remove a rendered polygon.
    fn remove_polygon(&mut self, shape: ShapeId);

    /// Render a draggable vertex handle.
    fn add_vertex_marker(&mut self, at: LatLng) -> MarkerId;

    /// Move a vertex handle.
    fn move_vertex_marker(&mut self, marker: MarkerId, to: LatLng);

    /// Remove a vertex handle.
    fn remove_vertex_marker(&mut self, marker: MarkerId);

    /// Open the (single) info popup at the given anchor.
    fn open_popup(&mut self, anchor: LatLng, content: String);

    /// Close the info popup if one is open.
    fn close_popup(&mut self);
}

// ─── Mock Widget ─────────────────────────────────────────────

/// One recorded widget call, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOp {
    SetCenter { center: LatLng, zoom: u8 },
    FitBounds(Rect<f64>),
    BeginDraw(DrawToolId),
    EndDraw(DrawToolId),
    AddPolygon(ShapeId),
    UpdatePolygon(ShapeId),
    RemovePolygon(ShapeId),
    AddMarker(MarkerId),
    MoveMarker(MarkerId),
    RemoveMarker(MarkerId),
    OpenPopup { anchor: LatLng },
    ClosePopup,
}

#[derive(Debug, Default)]
struct MockState {
    ops: Vec<WidgetOp>,
    next_id: u64,
    shapes: HashMap<u64, Vec<Coord<f64>>>,
    markers: HashMap<u64, LatLng>,
    active_tools: Vec<DrawToolId>,
    popup: Option<(LatLng, String)>,
    center: Option<(LatLng, u8)>,
    fitted_bounds: Option<Rect<f64>>,
}

impl MockState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Recording [`MapWidget`] for tests and headless runs.
#[derive(Default)]
pub struct MockWidget {
    state: Rc<RefCell<MockState>>,
}

/// Read-only view into a [`MockWidget`]'s recorded state.
///
/// The probe stays valid after the widget has been moved into a drawing
/// session or zone view, which is exactly when assertions are needed.
#[derive(Clone, Default)]
pub struct MockProbe {
    state: Rc<RefCell<MockState>>,
}

impl MockWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a widget plus a probe sharing its state.
    pub fn with_probe() -> (Self, MockProbe) {
        let widget = Self::new();
        let probe = MockProbe {
            state: Rc::clone(&widget.state),
        };
        (widget, probe)
    }
}

impl MockProbe {
    /// All recorded operations, in order.
    pub fn ops(&self) -> Vec<WidgetOp> {
        self.state.borrow().ops.clone()
    }

    /// Number of polygons currently rendered.
    pub fn live_shapes(&self) -> usize {
        self.state.borrow().shapes.len()
    }

    /// Number of vertex markers currently rendered.
    pub fn live_markers(&self) -> usize {
        self.state.borrow().markers.len()
    }

    /// Number of drawing tools currently active.
    pub fn live_draw_tools(&self) -> usize {
        self.state.borrow().active_tools.len()
    }

    /// Current ring of a rendered polygon, if it is still alive.
    pub fn shape_ring(&self, shape: ShapeId) -> Option<Vec<Coord<f64>>> {
        self.state.borrow().shapes.get(&shape.0).cloned()
    }

    /// Current position of a vertex marker, if it is still alive.
    pub fn marker_position(&self, marker: MarkerId) -> Option<LatLng> {
        self.state.borrow().markers.get(&marker.0).copied()
    }

    /// The open popup's anchor and content, if any.
    pub fn popup(&self) -> Option<(LatLng, String)> {
        self.state.borrow().popup.clone()
    }

    /// Last center/zoom the map was set to.
    pub fn center(&self) -> Option<(LatLng, u8)> {
        self.state.borrow().center
    }

    /// Last bounds passed to `fit_bounds`.
    pub fn fitted_bounds(&self) -> Option<Rect<f64>> {
        self.state.borrow().fitted_bounds
    }
}

impl MapWidget for MockWidget {
    fn set_center(&mut self, center: LatLng, zoom: u8) {
        let mut state = self.state.borrow_mut();
        state.center = Some((center, zoom));
        state.ops.push(WidgetOp::SetCenter { center, zoom });
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        let mut state = self.state.borrow_mut();
        state.fitted_bounds = Some(bounds);
        state.ops.push(WidgetOp::FitBounds(bounds));
    }

    fn begin_draw(&mut self) -> DrawToolId {
        let mut state = self.state.borrow_mut();
        let tool = DrawToolId(state.next_id());
        state.active_tools.push(tool);
        state.ops.push(WidgetOp::BeginDraw(tool));
        tool
    }

    fn end_draw(&mut self, tool: DrawToolId) {
        let mut state = self.state.borrow_mut();
        state.active_tools.retain(|t| *t != tool);
        state.ops.push(WidgetOp::EndDraw(tool));
    }

    fn add_polygon(&mut self, ring: &[Coord<f64>], _style: &PolygonStyle) -> ShapeId {
        let mut state = self.state.borrow_mut();
        let shape = ShapeId(state.next_id());
        state.shapes.insert(shape.0, ring.to_vec());
        state.ops.push(WidgetOp::AddPolygon(shape));
        shape
    }

    fn update_polygon(&mut self, shape: ShapeId, ring: &[Coord<f64>]) {
        let mut state = self.state.borrow_mut();
        state.shapes.insert(shape.0, ring.to_vec());
        state.ops.push(WidgetOp::UpdatePolygon(shape));
    }

    fn remove_polygon(&mut self, shape: ShapeId) {
        let mut state = self.state.borrow_mut();
        state.shapes.remove(&shape.0);
        state.ops.push(WidgetOp::RemovePolygon(shape));
    }

    fn add_vertex_marker(&mut self, at: LatLng) -> MarkerId {
        let mut state = self.state.borrow_mut();
        let marker = MarkerId(state.next_id());
        state.markers.insert(marker.0, at);
        state.ops.push(WidgetOp::AddMarker(marker));
        marker
    }

    fn move_vertex_marker(&mut self, marker: MarkerId, to: LatLng) {
        let mut state = self.state.borrow_mut();
        state.markers.insert(marker.0, to);
        state.ops.push(WidgetOp::MoveMarker(marker));
    }

    fn remove_vertex_marker(&mut self, marker: MarkerId) {
        let mut state = self.state.borrow_mut();
        state.markers.remove(&marker.0);
        state.ops.push(WidgetOp::RemoveMarker(marker));
    }

    fn open_popup(&mut self, anchor: LatLng, content: String) {
        let mut state = self.state.borrow_mut();
        state.popup = Some((anchor, content));
        state.ops.push(WidgetOp::OpenPopup { anchor });
    }

    fn close_popup(&mut self) {
        let mut state = self.state.borrow_mut();
        state.popup = None;
        state.ops.push(WidgetOp::ClosePopup);
    }
}
