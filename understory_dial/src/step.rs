// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detent quantization.
//!
//! A [`Step`] is configured in degrees and applied in radians. Quantized
//! angles are always a whole multiple of the step, and the discrete value
//! reported to step observers is that multiple expressed back in degrees.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::config::DialConfigError;
use crate::units::{MAX_DEG, radians_from_degrees};

/// A validated detent size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    degrees: f64,
    radians: f64,
}

impl Step {
    /// Creates a step of `degrees` per detent.
    ///
    /// The size must be finite, positive and no larger than a full turn.
    pub fn from_degrees(degrees: f64) -> Result<Self, DialConfigError> {
        if !degrees.is_finite() || degrees <= 0.0 || degrees > MAX_DEG {
            return Err(DialConfigError::InvalidStep(degrees));
        }
        Ok(Self {
            degrees,
            radians: radians_from_degrees(degrees),
        })
    }

    /// Step size in degrees.
    #[must_use]
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Step size in radians.
    #[must_use]
    pub fn radians(&self) -> f64 {
        self.radians
    }

    /// Signed index of the detent nearest to `rad`.
    #[must_use]
    pub fn index(&self, rad: f64) -> f64 {
        (rad / self.radians).round()
    }

    /// Snaps `rad` to the nearest detent.
    #[must_use]
    pub fn quantize(&self, rad: f64) -> f64 {
        self.index(rad) * self.radians
    }

    /// The value reported for the detent nearest to `rad`, in degrees.
    #[must_use]
    pub fn value(&self, rad: f64) -> f64 {
        self.index(rad) * self.degrees
    }
}
