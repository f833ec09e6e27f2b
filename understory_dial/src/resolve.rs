// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer angle resolution and angle wrapping.
//!
//! Coordinates are expected in a y-down space (the usual screen or page
//! convention). Angle `0` points straight up from the center and angles grow
//! clockwise, so a pointer to the right of the center resolves to a quarter
//! turn.

use core::f64::consts::FRAC_PI_2;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::units::MAX_RAD;

/// Resolves the angle of `pointer` around `center`, in `[0, 2π)`.
///
/// A pointer exactly on the center has no direction. It resolves to a quarter
/// turn (the `atan2(0, 0) = 0` result shifted by the up-offset) and is not
/// treated as an error.
///
/// ```
/// use kurbo::Point;
/// use understory_dial::resolve::pointer_angle;
///
/// let center = Point::new(50.0, 50.0);
/// assert!(pointer_angle(Point::new(50.0, 0.0), center).abs() < 1e-12);
/// let right = pointer_angle(Point::new(100.0, 50.0), center);
/// assert!((right - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[must_use]
pub fn pointer_angle(pointer: Point, center: Point) -> f64 {
    let mut rad = (pointer - center).atan2() + FRAC_PI_2;
    if rad < 0.0 {
        rad += MAX_RAD;
    }
    rad
}

/// Wraps any angle into `[0, 2π)`.
///
/// Non-finite input has no meaningful position on the dial and maps to `0`.
#[must_use]
pub fn wrap_angle(rad: f64) -> f64 {
    if !rad.is_finite() {
        return 0.0;
    }
    if (0.0..MAX_RAD).contains(&rad) {
        return rad;
    }
    let wrapped = rad - MAX_RAD * (rad / MAX_RAD).floor();
    // Tiny negative inputs can round up to exactly one full turn.
    if wrapped >= MAX_RAD || wrapped < 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Applies a single full-turn correction so a candidate just outside
/// `[0, 2π]` lands back inside it.
///
/// Used for drag deltas, which never move more than a fraction of a turn
/// between two samples.
#[must_use]
pub(crate) fn correct_single_turn(rad: f64) -> f64 {
    if rad < 0.0 {
        rad + MAX_RAD
    } else if rad > MAX_RAD {
        rad - MAX_RAD
    } else {
        rad
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-π, π]`.
#[must_use]
pub(crate) fn shortest_delta(from: f64, to: f64) -> f64 {
    let half = MAX_RAD / 2.0;
    let delta = wrap_angle(to - from);
    if delta > half { delta - MAX_RAD } else { delta }
}
