// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dial configuration and its validation errors.

use core::fmt;

use crate::step::Step;

/// Default per-tick velocity multiplier while coasting.
pub const DEFAULT_INERTIA_FRICTION: f64 = 0.9;

/// Default duration of an eased [`crate::Dial::set_value`] transition.
pub const DEFAULT_EASING_DURATION_MS: f64 = 200.0;

/// Construction-time options for a [`crate::Dial`].
///
/// All options are fixed once the dial exists. Use the `with_*` setters to
/// build a configuration from [`DialConfig::default`]:
///
/// ```
/// use understory_dial::DialConfig;
///
/// let config = DialConfig::default()
///     .with_step(15.0)
///     .with_inertia(true)
///     .with_inertia_friction(0.85);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.step, Some(15.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialConfig {
    /// Degrees per detent, or `None` for a continuous dial.
    pub step: Option<f64>,
    /// Animate [`crate::Dial::set_value`] with an ease-out curve.
    pub easing: bool,
    /// Keep rotating after a drag is released, decaying by
    /// [`DialConfig::inertia_friction`] each tick.
    pub inertia: bool,
    /// Velocity multiplier applied on every inertia tick; in `(0, 1)`.
    pub inertia_friction: f64,
    /// Duration of an eased transition in milliseconds.
    pub easing_duration_ms: f64,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            step: None,
            easing: false,
            inertia: false,
            inertia_friction: DEFAULT_INERTIA_FRICTION,
            easing_duration_ms: DEFAULT_EASING_DURATION_MS,
        }
    }
}

impl DialConfig {
    /// Sets the detent size in degrees. `0` disables quantization.
    #[must_use]
    pub fn with_step(mut self, degrees: f64) -> Self {
        self.step = if degrees == 0.0 { None } else { Some(degrees) };
        self
    }

    /// Enables or disables eased programmatic transitions.
    #[must_use]
    pub fn with_easing(mut self, easing: bool) -> Self {
        self.easing = easing;
        self
    }

    /// Enables or disables inertia after release.
    #[must_use]
    pub fn with_inertia(mut self, inertia: bool) -> Self {
        self.inertia = inertia;
        self
    }

    /// Sets the inertia friction factor.
    #[must_use]
    pub fn with_inertia_friction(mut self, friction: f64) -> Self {
        self.inertia_friction = friction;
        self
    }

    /// Sets the eased transition duration in milliseconds.
    #[must_use]
    pub fn with_easing_duration_ms(mut self, duration_ms: f64) -> Self {
        self.easing_duration_ms = duration_ms;
        self
    }

    /// Checks every option, returning the first invalid one.
    pub fn validate(&self) -> Result<(), DialConfigError> {
        self.step_rule()?;
        let friction = self.inertia_friction;
        if !(friction > 0.0 && friction < 1.0) {
            return Err(DialConfigError::InvalidFriction(friction));
        }
        let duration = self.easing_duration_ms;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DialConfigError::InvalidEasingDuration(duration));
        }
        Ok(())
    }

    /// The validated step rule, if quantization is configured.
    pub fn step_rule(&self) -> Result<Option<Step>, DialConfigError> {
        self.step.map(Step::from_degrees).transpose()
    }
}

/// Error returned when a [`DialConfig`] would produce incorrect motion.
#[derive(Clone, Copy, PartialEq)]
pub enum DialConfigError {
    /// Step size is negative, non-finite, or larger than a full turn.
    InvalidStep(f64),
    /// Inertia friction is outside the open interval `(0, 1)`.
    InvalidFriction(f64),
    /// Easing duration is not a finite, positive number of milliseconds.
    InvalidEasingDuration(f64),
}

impl fmt::Debug for DialConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStep(v) => write!(f, "DialConfigError::InvalidStep({v:?})"),
            Self::InvalidFriction(v) => write!(f, "DialConfigError::InvalidFriction({v:?})"),
            Self::InvalidEasingDuration(v) => {
                write!(f, "DialConfigError::InvalidEasingDuration({v:?})")
            }
        }
    }
}

impl fmt::Display for DialConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStep(v) => {
                write!(f, "step must be a positive number of degrees up to 360, got {v}")
            }
            Self::InvalidFriction(v) => {
                write!(f, "inertia friction must lie strictly between 0 and 1, got {v}")
            }
            Self::InvalidEasingDuration(v) => {
                write!(f, "easing duration must be a positive number of milliseconds, got {v}")
            }
        }
    }
}

impl core::error::Error for DialConfigError {}
