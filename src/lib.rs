// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Zone editor: boundary drawing and validation for service zones
//!
//! This crate is the map-facing core of the zone admin dashboard. It owns
//! the polygon math (centroid, area, overlap, hit testing), validates zone
//! configurations against business rules and sibling zones, runs the
//! interactive draw/edit session over an abstract map widget, and renders
//! the read-only zone overview with aggregate statistics.

pub mod config;
pub mod error;
pub mod geometry;
pub mod map;
pub mod models;
pub mod services;
pub mod time_utils;

pub use config::EditorConfig;
pub use error::{EditorError, Result};
