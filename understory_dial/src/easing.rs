// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed, eased moves toward a target angle.
//!
//! An [`EasedTransition`] is sampled with absolute timestamps, so frames that
//! arrive late simply land further along the curve. The final sample is always
//! exactly the target.

/// Quadratic ease-out: fast start, gentle finish.
///
/// `t` is expected in `[0, 1]`.
#[inline]
#[must_use]
pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

/// One sample of an [`EasedTransition`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasedSample {
    /// The angle to commit.
    pub value: f64,
    /// `true` once the transition has reached its target.
    pub finished: bool,
}

/// An ease-out move from `start` to `target` over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasedTransition {
    start: f64,
    target: f64,
    start_time_ms: f64,
    duration_ms: f64,
}

impl EasedTransition {
    /// Creates a transition beginning at `start_time_ms`.
    ///
    /// Neither angle is wrapped: a target beyond a full turn is reached by
    /// sweeping through the seam.
    #[must_use]
    pub fn new(start: f64, target: f64, start_time_ms: f64, duration_ms: f64) -> Self {
        Self {
            start,
            target,
            start_time_ms,
            duration_ms,
        }
    }

    /// Linear progress at `now_ms`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        let t = (now_ms - self.start_time_ms) / self.duration_ms;
        if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) }
    }

    /// Samples the eased angle at `now_ms`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> EasedSample {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return EasedSample {
                value: self.target,
                finished: true,
            };
        }
        EasedSample {
            value: self.start + (self.target - self.start) * ease_out_quad(t),
            finished: false,
        }
    }

    /// Angle the transition started from.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Angle the transition ends at.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }
}
