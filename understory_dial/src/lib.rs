// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dial --heading-base-level=0

//! Understory Dial: headless rotary dial state.
//!
//! This crate tracks the continuous rotation of a circular control and reports
//! it in several equivalent units. It focuses on:
//! - Resolving pointer positions into angles around the dial's center.
//! - Counting whole revolutions so readings stay continuous across the seam.
//! - Snapping to detents and reporting the active detent.
//! - Coasting after a fast release (inertia) and eased programmatic moves.
//!
//! It does **not** listen for input, read layout, or render. Callers are
//! expected to:
//! - Forward pointer down/move/up events to [`Dial::begin_drag`],
//!   [`Dial::drag_to`] and [`Dial::end_drag`], together with the dial's center
//!   (for example `Rect::center` of its bounds) and a monotonic timestamp.
//! - Provide a [`FrameScheduler`] and call [`Dial::on_frame`] when a requested
//!   frame fires.
//! - Render from [`Dial::angle`] or [`Dial::transform_about`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_dial::{Dial, DialConfig, ManualFrames};
//!
//! let config = DialConfig::default().with_step(15.0);
//! let mut dial = Dial::new(config, ManualFrames::new()).unwrap();
//!
//! // Values are given in half-degrees: 180 is a quarter turn.
//! dial.set_value(180.0, 0.0);
//! assert!((dial.degrees() - 90.0).abs() < 1e-9);
//! assert_eq!(dial.step_value(), Some(90.0));
//!
//! // Drag from the top of the dial a little past the right-hand side.
//! let center = Rect::new(0.0, 0.0, 100.0, 100.0).center();
//! dial.begin_drag(Point::new(50.0, 0.0), center, 0.0);
//! dial.drag_to(Point::new(100.0, 60.0), center, 16.0);
//! dial.end_drag();
//! // Snapped to the nearest 15 degree detent.
//! assert!((dial.degrees() - 195.0).abs() < 1e-9);
//! ```
//!
//! ## Animations
//!
//! Inertia and eased transitions never run a loop of their own. They request
//! one frame at a time from the dial's [`FrameScheduler`]; the host answers by
//! calling [`Dial::on_frame`] with the handle it handed out:
//!
//! ```rust
//! use understory_dial::{Dial, DialConfig, DriverKind, ManualFrames};
//!
//! let config = DialConfig::default().with_easing(true);
//! let mut dial = Dial::new(config, ManualFrames::new()).unwrap();
//! dial.set_value(360.0, 0.0);
//! assert_eq!(dial.driver(), DriverKind::Easing);
//!
//! let mut now = 0.0;
//! while !dial.scheduler().is_idle() {
//!     now += 16.0;
//!     for frame in dial.scheduler_mut().take_pending() {
//!         dial.on_frame(frame, now);
//!     }
//! }
//! assert!((dial.degrees() - 180.0).abs() < 1e-9);
//! assert_eq!(dial.driver(), DriverKind::Idle);
//! ```
//!
//! Only one driver (a drag, inertia or an eased transition) moves the dial at
//! a time. Starting any of them cancels the others, and frames belonging to a
//! cancelled driver are ignored even if the host still delivers them.
//!
//! ## Diagnostics
//!
//! Driver transitions are reported through [`tracing`] at `debug` level and
//! per-sample values at `trace` level. No subscriber is installed.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

pub mod drag;
pub mod easing;
pub mod inertia;
pub mod resolve;
pub mod units;

mod config;
mod dial;
mod schedule;
mod state;
mod step;

pub use config::{
    DEFAULT_EASING_DURATION_MS, DEFAULT_INERTIA_FRICTION, DialConfig, DialConfigError,
};
pub use dial::{Dial, DriverKind, InputOutcome, SET_VALUE_SCALE};
pub use schedule::{FrameId, FrameScheduler, ManualFrames};
pub use state::{Commit, Direction, RotationState};
pub use step::Step;
