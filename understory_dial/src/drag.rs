// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session helper: turn pointer positions into dial rotations and angular velocity.
//!
//! ## Usage
//!
//! 1) Begin a session with [`DragSession::begin`] from the pointer-down position.
//! 2) On each move, call [`DragSession::update`] with the dial's resting angle
//!    to get the next rotation to commit and the instantaneous velocity.
//! 3) Drop the session on release; [`DragSession::velocity`] seeds inertia.
//!
//! The session only tracks the pointer. Where the dial rests between sessions
//! (the anchor passed to `update`) belongs to the owner, so a session always
//! continues from the dial's current position instead of jumping to the
//! pointer.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_dial::drag::DragSession;
//!
//! let center = Point::new(0.0, 0.0);
//! // Grab the dial at the top and move a quarter turn clockwise.
//! let mut session = DragSession::begin(Point::new(0.0, -10.0), center, 0.0);
//! let sample = session.update(Point::new(10.0, 0.0), center, 100.0, 0.0);
//! assert!((sample.rotation - core::f64::consts::FRAC_PI_2).abs() < 1e-9);
//! // A quarter turn in 100 ms.
//! assert!((sample.velocity - 5.0 * core::f64::consts::PI).abs() < 1e-9);
//! ```

use kurbo::Point;

use crate::resolve::{correct_single_turn, pointer_angle, shortest_delta};

/// Elapsed time substituted when two samples share a timestamp.
pub const NOMINAL_FRAME_MS: f64 = 16.0;

/// One processed pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSample {
    /// The rotation to commit, in `[0, 2π]`.
    pub rotation: f64,
    /// Angular velocity since the previous sample, in radians per second.
    pub velocity: f64,
}

/// Pointer tracking for a single drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Pointer angle around the center at the previous sample.
    pointer_angle: f64,
    /// Timestamp of the previous sample in milliseconds.
    last_time_ms: f64,
    velocity: f64,
}

impl DragSession {
    /// Starts a session with the pointer at `pointer` around `center`.
    #[must_use]
    pub fn begin(pointer: Point, center: Point, now_ms: f64) -> Self {
        Self {
            pointer_angle: pointer_angle(pointer, center),
            last_time_ms: now_ms,
            velocity: 0.0,
        }
    }

    /// Processes a move to `pointer`.
    ///
    /// `anchor` is the rotation the dial rested at after the previous sample.
    /// The pointer's angular movement is added to it, with a single full-turn
    /// correction when the sum leaves `[0, 2π]`.
    pub fn update(
        &mut self,
        pointer: Point,
        center: Point,
        now_ms: f64,
        anchor: f64,
    ) -> DragSample {
        let angle = pointer_angle(pointer, center);
        let relative = angle - self.pointer_angle;
        let rotation = correct_single_turn(anchor + relative);

        let mut elapsed_ms = now_ms - self.last_time_ms;
        if elapsed_ms == 0.0 {
            elapsed_ms = NOMINAL_FRAME_MS;
        }
        // Measure along the short way round so crossing the seam does not
        // read as a full turn in one sample.
        self.velocity = shortest_delta(anchor, rotation) / (elapsed_ms / 1000.0);

        self.pointer_angle = angle;
        self.last_time_ms = now_ms;
        DragSample {
            rotation,
            velocity: self.velocity,
        }
    }

    /// Velocity measured at the latest sample, in radians per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Pointer angle at the latest sample.
    #[must_use]
    pub fn pointer_angle(&self) -> f64 {
        self.pointer_angle
    }
}
