// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation-frame capability a [`crate::Dial`] needs from its host.
//!
//! A dial never runs its own loop. When inertia or an eased transition wants
//! another tick, it asks its [`FrameScheduler`] for a frame and remembers the
//! returned handle. When the host's frame fires, the host calls
//! [`crate::Dial::on_frame`] with that handle and the frame timestamp.
//!
//! Only the handle of the dial's current driver is honored. Frames that were
//! cancelled, or belong to a driver that has since been replaced, are ignored
//! even if the host delivers them anyway.
//!
//! [`ManualFrames`] is a deterministic scheduler for tests and headless hosts:
//! it only records requests, and the caller decides when they fire.

use alloc::vec::Vec;
use core::fmt;

/// Host-provided "run before the next display refresh" capability.
pub trait FrameScheduler {
    /// Identifies one requested frame.
    type Handle: Copy + PartialEq + fmt::Debug;

    /// Requests a single frame callback.
    fn request_frame(&mut self) -> Self::Handle;

    /// Cancels a previously requested frame.
    ///
    /// Must be a no-op for handles that already fired or were already
    /// cancelled.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Handle issued by [`ManualFrames`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// The raw sequence number of this frame.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A scheduler whose frames fire only when the caller says so.
///
/// ```
/// use understory_dial::{FrameScheduler, ManualFrames};
///
/// let mut frames = ManualFrames::new();
/// let a = frames.request_frame();
/// let b = frames.request_frame();
/// frames.cancel_frame(a);
/// frames.cancel_frame(a);
/// assert_eq!(frames.take_pending(), vec![b]);
/// assert!(frames.is_idle());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualFrames {
    next: u64,
    pending: Vec<FrameId>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrames {
    /// Creates a scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet taken or cancelled, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[FrameId] {
        &self.pending
    }

    /// Removes and returns every pending frame, oldest first.
    pub fn take_pending(&mut self) -> Vec<FrameId> {
        core::mem::take(&mut self.pending)
    }

    /// `true` when no frame is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total number of frames ever requested.
    #[must_use]
    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    /// Number of pending frames that were cancelled.
    #[must_use]
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrames {
    type Handle = FrameId;

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next);
        self.next += 1;
        self.requested += 1;
        self.pending.push(id);
        id
    }

    fn cancel_frame(&mut self, handle: FrameId) {
        let before = self.pending.len();
        self.pending.retain(|&id| id != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_ordered() {
        let mut frames = ManualFrames::new();
        let a = frames.request_frame();
        let b = frames.request_frame();
        assert!(a < b);
        assert_eq!(frames.pending(), &[a, b]);
        assert_eq!(frames.requested_count(), 2);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut frames = ManualFrames::new();
        let a = frames.request_frame();
        frames.cancel_frame(a);
        frames.cancel_frame(a);
        assert!(frames.is_idle());
        assert_eq!(frames.cancelled_count(), 1);
    }

    #[test]
    fn cancelling_a_taken_frame_is_a_no_op() {
        let mut frames = ManualFrames::new();
        let a = frames.request_frame();
        assert_eq!(frames.take_pending(), [a]);
        frames.cancel_frame(a);
        assert_eq!(frames.cancelled_count(), 0);
        let b = frames.request_frame();
        assert_ne!(a, b);
    }
}
