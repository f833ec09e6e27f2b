// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rotation state model.
//!
//! [`RotationState`] is the single authoritative record of where a dial is.
//! Every mutation goes through [`RotationState::apply_rotation`], which
//! quantizes, wraps, counts revolutions and derives the direction as one
//! commit. Observers are notified by the owner after the commit returns, so
//! they never see a half-updated state.
//!
//! ## Revolution counting
//!
//! Crossing the `0`/`2π` seam is detected from percent bands rather than from
//! the size of a jump: leaving the high band (`60..=100`) straight into the
//! low band (`0..=30`) counts one forward revolution, and the reverse counts
//! one backward. The dead zone between `30` and `60` keeps jitter near either
//! edge from counting. This relies on updates arriving often enough that no
//! single call skips more than half a turn.
//!
//! ```
//! use understory_dial::RotationState;
//!
//! let mut state = RotationState::new(None);
//! for pct in [70.0, 95.0, 5.0, 40.0] {
//!     state.apply_rotation(pct / 100.0 * core::f64::consts::TAU);
//! }
//! // 70 -> 95 -> 5 crossed the seam forward once; the first 0 -> 70 step
//! // counted as a backward crossing.
//! assert_eq!(state.spin(), 0);
//! assert!(state.is_clockwise());
//! ```

use crate::resolve::wrap_angle;
use crate::step::Step;
use crate::units::{MAX_DEG, MAX_PCT, MAX_RAD, to_degrees, to_percent};

/// Quantized angles this close to a full turn are stored as `0`.
const SEAM_EPSILON: f64 = 1e-9;

/// Which way the dial last moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// The continuous reading increased.
    Clockwise,
    /// The continuous reading decreased or stayed the same.
    #[default]
    CounterClockwise,
}

/// What a single [`RotationState::apply_rotation`] commit produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Commit {
    /// The stored angle, in `[0, 2π)`.
    pub angle: f64,
    /// Change in the revolution count: `-1`, `0` or `1`.
    pub spin_delta: i64,
    /// The detent value in degrees when a step is configured.
    pub step_value: Option<f64>,
}

/// Current rotation of a dial across any number of revolutions.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationState {
    angle: f64,
    spin: i64,
    last_percent: f64,
    last_full_angle: f64,
    direction: Direction,
    step: Option<Step>,
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RotationState {
    /// Creates a state resting at angle `0` with no revolutions.
    #[must_use]
    pub fn new(step: Option<Step>) -> Self {
        Self {
            angle: 0.0,
            spin: 0,
            last_percent: 0.0,
            last_full_angle: 0.0,
            direction: Direction::default(),
            step,
        }
    }

    /// Commits a new raw angle.
    ///
    /// The angle may lie outside `[0, 2π)`; it is quantized to the configured
    /// step (if any) and wrapped before being stored. The revolution count
    /// changes by at most one per call.
    pub fn apply_rotation(&mut self, raw: f64) -> Commit {
        let mut rad = wrap_angle(raw);
        if let Some(step) = self.step {
            rad = step.quantize(rad);
            // The last detent of a turn can round up onto the seam.
            if MAX_RAD - rad < SEAM_EPSILON {
                rad = 0.0;
            }
        }
        self.angle = rad;

        let percent = to_percent(rad);
        let last = self.last_percent;
        let mut spin_delta = 0;
        if (60.0..=100.0).contains(&last) && (0.0..=30.0).contains(&percent) {
            spin_delta = 1;
        } else if (0.0..=30.0).contains(&last) && (60.0..=100.0).contains(&percent) {
            spin_delta = -1;
        }
        self.spin += spin_delta;

        let full = self.full_angle();
        self.direction = if self.last_full_angle < full {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        self.last_percent = percent;
        self.last_full_angle = full;

        Commit {
            angle: rad,
            spin_delta,
            step_value: self.step_value(),
        }
    }

    /// Current angle within one revolution, in `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current angle in degrees, in `[0, 360)`.
    #[must_use]
    pub fn degrees(&self) -> f64 {
        to_degrees(self.angle)
    }

    /// Current angle as a percentage of a turn, in `[0, 100)`.
    #[must_use]
    pub fn percent(&self) -> f64 {
        to_percent(self.angle)
    }

    /// Signed count of completed revolutions.
    #[must_use]
    pub fn spin(&self) -> i64 {
        self.spin
    }

    /// Unbounded angle including completed revolutions.
    #[must_use]
    pub fn full_angle(&self) -> f64 {
        self.angle + MAX_RAD * self.spin_f64()
    }

    /// Unbounded reading in degrees.
    #[must_use]
    pub fn full_degrees(&self) -> f64 {
        self.degrees() + MAX_DEG * self.spin_f64()
    }

    /// Unbounded reading in percent.
    #[must_use]
    pub fn full_percent(&self) -> f64 {
        self.percent() + MAX_PCT * self.spin_f64()
    }

    /// Direction of the last committed change.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `true` when the last commit increased the continuous reading.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.direction == Direction::Clockwise
    }

    /// The configured detent rule.
    #[must_use]
    pub fn step(&self) -> Option<Step> {
        self.step
    }

    /// Value of the current detent in degrees, when a step is configured.
    #[must_use]
    pub fn step_value(&self) -> Option<f64> {
        self.step.map(|step| step.value(self.angle))
    }

    fn spin_f64(&self) -> f64 {
        self.spin as f64
    }
}
