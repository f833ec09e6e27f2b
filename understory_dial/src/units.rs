// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between the three units a dial reports: radians, degrees and percent.
//!
//! All conversions are linear over one full turn. Inputs are not wrapped, so
//! multi-revolution readings (for example [`crate::RotationState::full_angle`])
//! convert just as well as angles inside a single turn.

use core::f64::consts::TAU;

/// One full turn in radians.
pub const MAX_RAD: f64 = TAU;
/// One full turn in degrees.
pub const MAX_DEG: f64 = 360.0;
/// One full turn in percent.
pub const MAX_PCT: f64 = 100.0;

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn to_degrees(rad: f64) -> f64 {
    rad * MAX_DEG / MAX_RAD
}

/// Converts radians to percent of a full turn.
#[inline]
#[must_use]
pub fn to_percent(rad: f64) -> f64 {
    rad * MAX_PCT / MAX_RAD
}

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn radians_from_degrees(deg: f64) -> f64 {
    deg * MAX_RAD / MAX_DEG
}

/// Converts percent of a full turn to radians.
#[inline]
#[must_use]
pub fn radians_from_percent(pct: f64) -> f64 {
    pct * MAX_RAD / MAX_PCT
}
