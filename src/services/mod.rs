// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod validation;
pub mod zones;

pub use validation::{validate_create, validate_update};
pub use zones::{ZoneLoadError, ZoneService};
