// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Editor error types shared across the crate.

use crate::config::ConfigError;
use crate::geometry::GeometryError;
use crate::services::zones::ZoneLoadError;

/// Top-level error for embedders driving the editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Surface is read-only")]
    ReadOnly,

    #[error("Cannot {action} while the session is {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("Vertex index {index} is out of range for a ring of {len} points")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Failed to load zones: {0}")]
    ZoneLoad(#[from] ZoneLoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
