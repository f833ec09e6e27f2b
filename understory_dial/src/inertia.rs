// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-release coasting.
//!
//! [`Inertia`] is a fixed-timestep model: every tick multiplies the velocity
//! by the friction factor and advances the position by one nominal 60 Hz
//! frame, regardless of how much wall-clock time really passed. Once the
//! velocity drops below [`REST_VELOCITY`] the model reports where it came to
//! rest and stops moving.
//!
//! ```
//! use understory_dial::inertia::{Inertia, InertiaTick};
//!
//! let mut coast = Inertia::new(0.0, 3.0, 0.9);
//! let mut ticks = 0;
//! let rest = loop {
//!     ticks += 1;
//!     match coast.tick() {
//!         InertiaTick::Advance(_) => {}
//!         InertiaTick::Rest(position) => break position,
//!     }
//! };
//! assert_eq!(ticks, Inertia::ticks_to_rest(3.0, 0.9));
//! assert!(rest > 0.0);
//! ```

use crate::resolve::wrap_angle;

/// Simulated time advanced per tick, in seconds.
pub const TIMESTEP: f64 = 1.0 / 60.0;

/// Speeds at or below this (radians per second) count as stopped.
pub const REST_VELOCITY: f64 = 0.001;

/// Outcome of one [`Inertia::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InertiaTick {
    /// Still moving; the new position in `[0, 2π)`.
    Advance(f64),
    /// Came to rest at this position. Further ticks keep reporting it.
    Rest(f64),
}

/// Decaying angular motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inertia {
    position: f64,
    velocity: f64,
    friction: f64,
}

impl Inertia {
    /// Starts coasting from `position` at `velocity` radians per second.
    #[must_use]
    pub fn new(position: f64, velocity: f64, friction: f64) -> Self {
        Self {
            position: wrap_angle(position),
            velocity,
            friction,
        }
    }

    /// Whether a release at `velocity` is fast enough to coast at all.
    #[must_use]
    pub fn should_coast(velocity: f64) -> bool {
        velocity.abs() > REST_VELOCITY
    }

    /// Advances the simulation by one [`TIMESTEP`].
    pub fn tick(&mut self) -> InertiaTick {
        self.velocity *= self.friction;
        if self.velocity.abs() < REST_VELOCITY {
            self.velocity = 0.0;
            return InertiaTick::Rest(self.position);
        }
        self.position = wrap_angle(self.position + self.velocity * TIMESTEP);
        InertiaTick::Advance(self.position)
    }

    /// Current position in `[0, 2π)`.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity in radians per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Number of ticks [`Inertia::tick`] takes to report [`InertiaTick::Rest`]
    /// from `velocity`, including the resting tick itself.
    ///
    /// Returns `usize::MAX` if `friction` can never bring it to rest.
    #[must_use]
    pub fn ticks_to_rest(velocity: f64, friction: f64) -> usize {
        let decays = friction.abs() < 1.0 && velocity.is_finite();
        if !decays && (velocity * friction).abs() >= REST_VELOCITY {
            return usize::MAX;
        }
        let mut v = velocity;
        let mut ticks = 0;
        loop {
            ticks += 1;
            v *= friction;
            if v.abs() < REST_VELOCITY {
                return ticks;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::MAX_RAD;

    #[test]
    fn slow_release_does_not_coast() {
        assert!(!Inertia::should_coast(0.001));
        assert!(!Inertia::should_coast(-0.0005));
        assert!(Inertia::should_coast(-0.002));
    }

    #[test]
    fn velocity_decays_by_friction() {
        let mut coast = Inertia::new(1.0, 6.0, 0.5);
        assert_eq!(coast.tick(), InertiaTick::Advance(1.0 + 3.0 * TIMESTEP));
        assert_eq!(coast.velocity(), 3.0);
        coast.tick();
        assert_eq!(coast.velocity(), 1.5);
    }

    #[test]
    fn converges_in_predicted_ticks() {
        let (v0, f) = (12.0, 0.9);
        let expected = Inertia::ticks_to_rest(v0, f);
        // Smallest n with v0 * f^n < 0.001.
        let mut n = 0;
        let mut v = v0;
        while v.abs() >= REST_VELOCITY {
            v *= f;
            n += 1;
        }
        assert_eq!(expected, n);

        let mut coast = Inertia::new(0.0, v0, f);
        for _ in 1..expected {
            assert!(matches!(coast.tick(), InertiaTick::Advance(_)));
        }
        assert!(matches!(coast.tick(), InertiaTick::Rest(_)));
        assert_eq!(coast.velocity(), 0.0);
    }

    #[test]
    fn rest_is_sticky() {
        let mut coast = Inertia::new(2.0, 0.0015, 0.5);
        assert_eq!(coast.tick(), InertiaTick::Rest(2.0));
        assert_eq!(coast.tick(), InertiaTick::Rest(2.0));
    }

    #[test]
    fn backward_motion_wraps_below_zero() {
        let mut coast = Inertia::new(0.01, -30.0, 0.99);
        match coast.tick() {
            InertiaTick::Advance(p) => assert!(p > MAX_RAD - 1.0 && p < MAX_RAD, "{p}"),
            InertiaTick::Rest(_) => panic!("should still be moving"),
        }
    }
}
