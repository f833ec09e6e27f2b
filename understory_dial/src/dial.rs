// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dial controller: input handling, drivers and observers around a
//! [`RotationState`].

use alloc::boxed::Box;
use core::fmt;
use core::mem;

use kurbo::{Affine, Point};

use crate::config::{DialConfig, DialConfigError};
use crate::drag::DragSession;
use crate::easing::EasedTransition;
use crate::inertia::{Inertia, InertiaTick};
use crate::resolve::wrap_angle;
use crate::schedule::FrameScheduler;
use crate::state::{Direction, RotationState};
use crate::units::radians_from_degrees;

/// [`Dial::set_value`] inputs are expressed in half-degrees.
pub const SET_VALUE_SCALE: f64 = 2.0;

/// Whether the host should suppress its default handling of an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The dial used the event; suppress default handling such as scrolling.
    Consumed,
    /// The dial ignored the event.
    Ignored,
}

/// Which driver currently owns the dial's angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DriverKind {
    /// Nothing is moving the dial.
    #[default]
    Idle,
    /// A pointer drag session.
    Drag,
    /// Post-release coasting.
    Inertia,
    /// An eased programmatic transition.
    Easing,
}

/// At most one of these drives `apply_rotation` at any time.
#[derive(Clone, Copy, Debug)]
enum Driver<H> {
    Idle,
    Drag(DragSession),
    Inertia { coast: Inertia, frame: H },
    Easing { transition: EasedTransition, frame: H },
}

impl<H> Driver<H> {
    fn kind(&self) -> DriverKind {
        match self {
            Self::Idle => DriverKind::Idle,
            Self::Drag(_) => DriverKind::Drag,
            Self::Inertia { .. } => DriverKind::Inertia,
            Self::Easing { .. } => DriverKind::Easing,
        }
    }
}

type ChangeObserver = Box<dyn FnMut(&RotationState)>;
type StepObserver = Box<dyn FnMut(f64)>;

/// A rotary dial driven by pointer drags, inertia and programmatic values.
///
/// The dial is headless: the host forwards pointer events with the dial's
/// center and a timestamp, forwards animation frames requested through the
/// scheduler `S`, and renders from the readable state (or from
/// [`Dial::transform_about`]).
///
/// Exactly one driver moves the dial at a time. Beginning a drag, calling
/// [`Dial::set_value`] or [`Dial::stop`] cancels whatever was running, including
/// its pending frame.
///
/// ```
/// use kurbo::Point;
/// use understory_dial::{Dial, DialConfig, ManualFrames};
///
/// let mut dial = Dial::new(DialConfig::default(), ManualFrames::new()).unwrap();
/// let center = Point::new(50.0, 50.0);
///
/// dial.begin_drag(Point::new(50.0, 0.0), center, 0.0);
/// dial.drag_to(Point::new(100.0, 50.0), center, 16.0);
/// dial.end_drag();
///
/// assert!((dial.degrees() - 90.0).abs() < 1e-9);
/// assert!(dial.is_clockwise());
/// ```
pub struct Dial<S: FrameScheduler> {
    config: DialConfig,
    state: RotationState,
    driver: Driver<S::Handle>,
    /// Unquantized rotation the next drag sample is measured from.
    anchor: f64,
    velocity: f64,
    scheduler: S,
    on_change: Option<ChangeObserver>,
    on_step: Option<StepObserver>,
}

impl<S: FrameScheduler> fmt::Debug for Dial<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dial")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("driver", &self.driver)
            .field("anchor", &self.anchor)
            .field("velocity", &self.velocity)
            .finish_non_exhaustive()
    }
}

impl<S: FrameScheduler> Dial<S> {
    /// Creates a dial at rest at angle `0`.
    ///
    /// Fails if `config` would produce incorrect motion.
    pub fn new(config: DialConfig, scheduler: S) -> Result<Self, DialConfigError> {
        config.validate()?;
        let step = config.step_rule()?;
        Ok(Self {
            config,
            state: RotationState::new(step),
            driver: Driver::Idle,
            anchor: 0.0,
            velocity: 0.0,
            scheduler,
            on_change: None,
            on_step: None,
        })
    }

    /// Registers the observer called after every committed rotation.
    ///
    /// Replaces any previous change observer.
    pub fn set_on_change(&mut self, observer: impl FnMut(&RotationState) + 'static) {
        self.on_change = Some(Box::new(observer));
    }

    /// Removes the change observer.
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Registers the observer called with the detent value (in degrees)
    /// after every committed rotation. Only fires when a step is configured.
    ///
    /// Replaces any previous step observer.
    pub fn set_on_step(&mut self, observer: impl FnMut(f64) + 'static) {
        self.on_step = Some(Box::new(observer));
    }

    /// Removes the step observer.
    pub fn clear_on_step(&mut self) {
        self.on_step = None;
    }

    /// Starts a drag with the pointer at `pointer`.
    ///
    /// `center` is the dial's center in the same coordinate space. Any running
    /// inertia or eased transition is cancelled.
    pub fn begin_drag(&mut self, pointer: Point, center: Point, now_ms: f64) -> InputOutcome {
        self.cancel_driver();
        self.velocity = 0.0;
        self.driver = Driver::Drag(DragSession::begin(pointer, center, now_ms));
        tracing::debug!(now_ms, "dial drag started");
        InputOutcome::Consumed
    }

    /// Moves an active drag to `pointer`, committing the resulting rotation.
    ///
    /// Ignored when no drag is active.
    pub fn drag_to(&mut self, pointer: Point, center: Point, now_ms: f64) -> InputOutcome {
        let Driver::Drag(session) = &mut self.driver else {
            return InputOutcome::Ignored;
        };
        let sample = session.update(pointer, center, now_ms, self.anchor);
        self.velocity = sample.velocity;
        self.anchor = sample.rotation;
        self.commit(sample.rotation);
        tracing::trace!(rotation = sample.rotation, velocity = sample.velocity, "dial drag");
        InputOutcome::Consumed
    }

    /// Ends an active drag.
    ///
    /// When inertia is enabled and the release was fast enough, the dial keeps
    /// coasting and [`Dial::driver`] reports [`DriverKind::Inertia`].
    pub fn end_drag(&mut self) -> InputOutcome {
        if !matches!(self.driver, Driver::Drag(_)) {
            return InputOutcome::Ignored;
        }
        self.driver = Driver::Idle;
        tracing::debug!(velocity = self.velocity, "dial drag ended");
        if self.config.inertia && Inertia::should_coast(self.velocity) {
            self.start_inertia();
        }
        InputOutcome::Consumed
    }

    /// Moves the dial to `value`, given in half-degrees (`180.0` is a quarter
    /// turn).
    ///
    /// With easing enabled this starts an eased transition at `now_ms`;
    /// otherwise the rotation is committed immediately. Either way any running
    /// driver is cancelled first.
    pub fn set_value(&mut self, value: f64, now_ms: f64) {
        let target = radians_from_degrees(value / SET_VALUE_SCALE);
        self.cancel_driver();
        if self.config.easing {
            let transition = EasedTransition::new(
                self.state.angle(),
                target,
                now_ms,
                self.config.easing_duration_ms,
            );
            let frame = self.scheduler.request_frame();
            self.driver = Driver::Easing { transition, frame };
            tracing::debug!(target_angle = target, "dial easing started");
        } else {
            self.commit(target);
            self.anchor = wrap_angle(target);
        }
    }

    /// Runs one animation frame.
    ///
    /// `frame` must be the handle the scheduler returned. Handles that do not
    /// belong to the current driver are ignored and `false` is returned.
    pub fn on_frame(&mut self, frame: S::Handle, now_ms: f64) -> bool {
        match mem::replace(&mut self.driver, Driver::Idle) {
            Driver::Inertia {
                coast,
                frame: active,
            } if active == frame => {
                self.tick_inertia(coast);
                true
            }
            Driver::Easing {
                transition,
                frame: active,
            } if active == frame => {
                self.tick_easing(transition, now_ms);
                true
            }
            other => {
                self.driver = other;
                tracing::trace!(?frame, "dial ignored stale frame");
                false
            }
        }
    }

    /// Cancels whatever driver is running. A no-op when idle.
    pub fn stop(&mut self) {
        self.cancel_driver();
    }

    /// The committed rotation state.
    #[must_use]
    pub fn state(&self) -> &RotationState {
        &self.state
    }

    /// The configuration this dial was built with.
    #[must_use]
    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    /// Current angle within one revolution, in `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.state.angle()
    }

    /// Current angle in degrees.
    #[must_use]
    pub fn degrees(&self) -> f64 {
        self.state.degrees()
    }

    /// Current angle in percent of a turn.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.state.percent()
    }

    /// Unbounded angle including completed revolutions.
    #[must_use]
    pub fn full_angle(&self) -> f64 {
        self.state.full_angle()
    }

    /// Unbounded reading in degrees.
    #[must_use]
    pub fn full_degrees(&self) -> f64 {
        self.state.full_degrees()
    }

    /// Unbounded reading in percent.
    #[must_use]
    pub fn full_percent(&self) -> f64 {
        self.state.full_percent()
    }

    /// Signed count of completed revolutions.
    #[must_use]
    pub fn spin(&self) -> i64 {
        self.state.spin()
    }

    /// Direction of the last committed change.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    /// `true` when the last commit moved clockwise.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.state.is_clockwise()
    }

    /// Value of the current detent in degrees, when a step is configured.
    #[must_use]
    pub fn step_value(&self) -> Option<f64> {
        self.state.step_value()
    }

    /// Latest angular velocity in radians per second.
    ///
    /// Measured during drags and decayed while coasting.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// `true` while a drag session owns the dial.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.driver, Driver::Drag(_))
    }

    /// The driver currently moving the dial.
    #[must_use]
    pub fn driver(&self) -> DriverKind {
        self.driver.kind()
    }

    /// Rotation to render the dial with, about its `center`.
    #[must_use]
    pub fn transform_about(&self, center: Point) -> Affine {
        Affine::rotate_about(self.state.angle(), center)
    }

    /// The frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the frame scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn cancel_driver(&mut self) {
        let previous = mem::replace(&mut self.driver, Driver::Idle);
        match previous {
            Driver::Idle => return,
            Driver::Drag(_) => {}
            Driver::Inertia { frame, .. } | Driver::Easing { frame, .. } => {
                self.scheduler.cancel_frame(frame);
            }
        }
        tracing::debug!(driver = ?previous.kind(), "dial driver cancelled");
    }

    fn start_inertia(&mut self) {
        let coast = Inertia::new(self.anchor, self.velocity, self.config.inertia_friction);
        let frame = self.scheduler.request_frame();
        self.driver = Driver::Inertia { coast, frame };
        tracing::debug!(velocity = self.velocity, "dial inertia started");
    }

    fn tick_inertia(&mut self, mut coast: Inertia) {
        match coast.tick() {
            InertiaTick::Advance(position) => {
                self.velocity = coast.velocity();
                self.commit(position);
                let frame = self.scheduler.request_frame();
                self.driver = Driver::Inertia { coast, frame };
            }
            InertiaTick::Rest(position) => {
                let snapped = match self.state.step() {
                    Some(step) => step.quantize(position),
                    None => position,
                };
                self.velocity = 0.0;
                self.commit(snapped);
                self.anchor = self.state.angle();
                if let Some(value) = self.state.step_value() {
                    self.notify_step(value);
                }
                tracing::debug!(angle = self.state.angle(), "dial inertia settled");
            }
        }
    }

    fn tick_easing(&mut self, transition: EasedTransition, now_ms: f64) {
        let sample = transition.sample(now_ms);
        self.commit(sample.value);
        if sample.finished {
            self.anchor = wrap_angle(transition.target());
            tracing::debug!(target_angle = transition.target(), "dial easing finished");
        } else {
            let frame = self.scheduler.request_frame();
            self.driver = Driver::Easing { transition, frame };
        }
    }

    /// Commits `raw` and then notifies observers.
    fn commit(&mut self, raw: f64) {
        let commit = self.state.apply_rotation(raw);
        if let Some(observer) = self.on_change.as_mut() {
            observer(&self.state);
        }
        if let Some(value) = commit.step_value {
            self.notify_step(value);
        }
    }

    fn notify_step(&mut self, value: f64) {
        if let Some(observer) = self.on_step.as_mut() {
            observer(value);
        }
    }
}

impl<S: FrameScheduler> Drop for Dial<S> {
    fn drop(&mut self) {
        self.cancel_driver();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualFrames;
    use crate::units::MAX_RAD;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::f64::consts::FRAC_PI_2;

    const C: Point = Point::new(0.0, 0.0);

    fn dial(config: DialConfig) -> Dial<ManualFrames> {
        Dial::new(config, ManualFrames::new()).unwrap()
    }

    fn run_frames(dial: &mut Dial<ManualFrames>, mut now: f64, max: usize) -> usize {
        let mut fired = 0;
        while fired < max {
            let pending = dial.scheduler_mut().take_pending();
            if pending.is_empty() {
                break;
            }
            for frame in pending {
                now += 16.0;
                dial.on_frame(frame, now);
                fired += 1;
            }
        }
        fired
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Dial::new(
            DialConfig::default().with_inertia_friction(1.0),
            ManualFrames::new(),
        )
        .unwrap_err();
        assert_eq!(err, DialConfigError::InvalidFriction(1.0));
    }

    #[test]
    fn drag_is_ignored_until_started() {
        let mut d = dial(DialConfig::default());
        assert_eq!(d.drag_to(Point::new(1.0, 0.0), C, 0.0), InputOutcome::Ignored);
        assert_eq!(d.end_drag(), InputOutcome::Ignored);
        assert_eq!(d.angle(), 0.0);
    }

    #[test]
    fn drag_continues_from_resting_angle() {
        let mut d = dial(DialConfig::default());
        d.set_value(180.0, 0.0);
        assert!((d.angle() - FRAC_PI_2).abs() < 1e-12);

        // Grab at the bottom and move to the left: another quarter turn.
        d.begin_drag(Point::new(0.0, 10.0), C, 0.0);
        assert!(d.is_dragging());
        d.drag_to(Point::new(-10.0, 0.0), C, 16.0);
        assert!((d.degrees() - 180.0).abs() < 1e-9);
        d.end_drag();
        assert_eq!(d.driver(), DriverKind::Idle);
    }

    #[test]
    fn change_observer_sees_committed_state() {
        let mut d = dial(DialConfig::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        d.set_on_change(move |state| sink.borrow_mut().push(state.degrees()));
        d.set_value(90.0, 0.0);
        d.set_value(270.0, 0.0);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!((seen[0] - 45.0).abs() < 1e-9);
        assert!((seen[1] - 135.0).abs() < 1e-9);
    }

    #[test]
    fn step_observer_only_fires_with_a_step() {
        let fired = Rc::new(RefCell::new(0));
        let mut d = dial(DialConfig::default());
        let sink = fired.clone();
        d.set_on_step(move |_| *sink.borrow_mut() += 1);
        d.set_value(100.0, 0.0);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn inertia_starts_on_fast_release() {
        let mut d = dial(DialConfig::default().with_inertia(true));
        d.begin_drag(Point::new(0.0, -10.0), C, 0.0);
        d.drag_to(Point::new(10.0, -10.0), C, 16.0);
        assert!(d.velocity() > 1.0);
        assert_eq!(d.end_drag(), InputOutcome::Consumed);
        assert_eq!(d.driver(), DriverKind::Inertia);
        assert_eq!(d.scheduler().pending().len(), 1);

        let fired = run_frames(&mut d, 16.0, 10_000);
        assert!(fired > 1);
        assert_eq!(d.driver(), DriverKind::Idle);
        assert_eq!(d.velocity(), 0.0);
        // Released at ~49 rad/s with friction 0.9: coasts a bit over one turn.
        assert_eq!(d.spin(), 1);
        assert!(d.full_angle() > MAX_RAD);
    }

    #[test]
    fn inertia_disabled_stops_on_release() {
        let mut d = dial(DialConfig::default());
        d.begin_drag(Point::new(0.0, -10.0), C, 0.0);
        d.drag_to(Point::new(10.0, -10.0), C, 16.0);
        d.end_drag();
        assert_eq!(d.driver(), DriverKind::Idle);
        assert!(d.scheduler().is_idle());
    }

    #[test]
    fn stale_frames_are_ignored() {
        let mut d = dial(DialConfig::default().with_easing(true));
        d.set_value(360.0, 0.0);
        let first = d.scheduler().pending()[0];
        d.set_value(90.0, 0.0);
        assert_eq!(d.scheduler().pending().len(), 1);
        assert!(!d.on_frame(first, 50.0));
        assert_eq!(d.angle(), 0.0);
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let mut d = dial(DialConfig::default().with_easing(true));
        d.set_value(360.0, 0.0);
        d.stop();
        assert!(d.scheduler().is_idle());
        assert_eq!(d.scheduler().cancelled_count(), 1);
        d.stop();
        assert_eq!(d.scheduler().cancelled_count(), 1);
    }

    #[test]
    fn transform_rotates_about_center() {
        let mut d = dial(DialConfig::default());
        d.set_value(180.0, 0.0);
        let center = Point::new(10.0, 10.0);
        let moved = d.transform_about(center) * Point::new(20.0, 10.0);
        // A quarter turn in y-down space maps "right of center" to "below".
        assert!((moved.x - 10.0).abs() < 1e-9);
        assert!((moved.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn eased_target_past_a_full_turn_counts_a_revolution() {
        let mut d = dial(DialConfig::default().with_easing(true));
        d.set_value(400.0, 0.0);
        run_frames(&mut d, 0.0, 100);
        // 200 degrees: no seam crossed.
        assert_eq!(d.spin(), 0);
        d.set_value(760.0, 300.0);
        run_frames(&mut d, 300.0, 100);
        // 380 degrees: swept across the seam once.
        assert_eq!(d.spin(), 1);
        assert!((d.full_degrees() - 380.0).abs() < 1e-9);
        assert!(d.angle() < MAX_RAD);
    }
}
