//! Frame and timer scheduling seam.
//!
//! The host environment supplies a `Scheduler` (a browser's animation-frame
//! and interval APIs, or the app's loop thread). Every handle the animation
//! acquires is held by a `Subscriptions` guard, which releases whatever is
//! still outstanding when the animation unmounts or is dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A pending display-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

/// A repeating interval timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// A resize listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerHandle(pub u64);

/// Host-side callbacks an animation can subscribe to.
///
/// Requests only register interest; the host later calls back into
/// `AnimationHost::on_frame`, `on_interval`, or `on_resize`.
pub trait Scheduler {
    /// Ask for one callback before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Ask for a callback every `every_ms` milliseconds until cleared.
    fn set_interval(&mut self, every_ms: u64) -> TimerHandle;
    fn clear_interval(&mut self, handle: TimerHandle);
    fn listen_resize(&mut self) -> ListenerHandle;
    fn unlisten_resize(&mut self, handle: ListenerHandle);
}

/// What an interval timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerPurpose {
    Spawn,
    Refresh,
}

/// Owns the scheduler and every outstanding handle acquired from it.
pub struct Subscriptions<S: Scheduler> {
    scheduler: S,
    frame: Option<FrameHandle>,
    timers: Vec<(TimerHandle, TimerPurpose)>,
    resize: Option<ListenerHandle>,
}

impl<S: Scheduler> Subscriptions<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            frame: None,
            timers: Vec::new(),
            resize: None,
        }
    }

    /// Request the next frame unless one is already pending.
    pub fn request_frame(&mut self) -> FrameHandle {
        if let Some(handle) = self.frame {
            return handle;
        }
        let handle = self.scheduler.request_frame();
        self.frame = Some(handle);
        handle
    }

    /// Mark `handle` as delivered. Returns false for a stale or unknown handle.
    pub fn frame_fired(&mut self, handle: FrameHandle) -> bool {
        if self.frame == Some(handle) {
            self.frame = None;
            true
        } else {
            false
        }
    }

    pub fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn set_interval(&mut self, every_ms: u64, purpose: TimerPurpose) -> TimerHandle {
        let handle = self.scheduler.set_interval(every_ms);
        self.timers.push((handle, purpose));
        handle
    }

    /// Purpose of a live timer, `None` if the handle is not ours.
    pub fn timer_purpose(&self, handle: TimerHandle) -> Option<TimerPurpose> {
        self.timers
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, purpose)| *purpose)
    }

    pub fn listen_resize(&mut self) -> ListenerHandle {
        if let Some(handle) = self.resize {
            return handle;
        }
        let handle = self.scheduler.listen_resize();
        self.resize = Some(handle);
        handle
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    /// Number of handles still held.
    pub fn outstanding(&self) -> usize {
        usize::from(self.frame.is_some()) + self.timers.len() + usize::from(self.resize.is_some())
    }

    /// Release every outstanding handle. Safe to call more than once.
    pub fn release_all(&mut self) {
        let released = self.outstanding();
        self.cancel_frame();
        for (handle, _) in self.timers.drain(..) {
            self.scheduler.clear_interval(handle);
        }
        if let Some(handle) = self.resize.take() {
            self.scheduler.unlisten_resize(handle);
        }
        if released > 0 {
            debug!(released, "released scheduler subscriptions");
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: Scheduler> Drop for Subscriptions<S> {
    fn drop(&mut self) {
        self.release_all();
    }
}
