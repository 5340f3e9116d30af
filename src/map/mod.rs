// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map-facing layer: the widget abstraction, the drawing session, and the
//! read-only zone overview.

pub mod drawing;
pub mod view;
pub mod widget;

pub use drawing::{
    ClearBehavior, ClearContext, DrawingEvent, DrawingOptions, DrawingSurface, SessionPhase,
};
pub use view::{ZoneMapView, ZoneSelection};
pub use widget::{
    style_for, DrawToolId, MapWidget, MarkerId, MockProbe, MockWidget, PolygonStyle, ShapeId,
    WidgetOp,
};
