//! Frame driving and reset scheduling
//!
//! [`Driver`] owns the simulation context and runs one integrate+paint
//! pass per host frame, indefinitely, until stopped. The host's
//! scheduling primitives sit behind [`Scheduler`] so cancellation and
//! resize debouncing stay testable off the browser.
//!
//! Cooperative single-threaded model: host events (frames, timers,
//! pointer, resize) are delivered one at a time and each runs to
//! completion, so there is no locking anywhere.

use glam::Vec2;

use crate::renderer::Surface;
use crate::sim::{SimState, Viewport, step};

/// Handle for a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle for a one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Host scheduling primitive: run a callback before the next paint, or
/// after a delay. Both return cancellable handles; the host is expected
/// to call back into [`Driver::on_frame`] / [`Driver::on_reset_timer`]
/// with the handle it was given.
pub trait Scheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle;
    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// Drives the per-frame loop and owns all reset scheduling state.
pub struct Driver<S: Scheduler> {
    sim: SimState,
    sched: S,
    pending_frame: Option<FrameHandle>,
    /// Pending debounced rebuild, cancel-and-rescheduled on every resize
    reset_timer: Option<TimerHandle>,
    /// Bounds from the most recent resize, applied when the timer fires
    pending_viewport: Option<Viewport>,
    debounce_ms: u32,
}

impl<S: Scheduler> Driver<S> {
    pub fn new(sim: SimState, sched: S, debounce_ms: u32) -> Self {
        Self {
            sim,
            sched,
            pending_frame: None,
            reset_timer: None,
            pending_viewport: None,
            debounce_ms,
        }
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.sched
    }

    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Populate the store against `viewport` and begin the loop.
    pub fn start(&mut self, viewport: Viewport) {
        self.sim.reset(viewport);
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.sched.request_frame());
        }
    }

    /// Cancel anything scheduled. Idempotent; a callback already queued
    /// when this runs is rejected later by the handle guard in
    /// [`Driver::on_frame`].
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.sched.cancel_frame(handle);
        }
        if let Some(handle) = self.reset_timer.take() {
            self.sched.clear_timeout(handle);
        }
        self.pending_viewport = None;
    }

    /// One frame: clear the surface, then integrate and paint every
    /// circle in store order. Stale handles (anything but the one we are
    /// waiting on) are dropped without touching the simulation.
    pub fn on_frame(&mut self, handle: FrameHandle, surface: &mut impl Surface) {
        if self.pending_frame != Some(handle) {
            return;
        }
        self.pending_frame = Some(self.sched.request_frame());

        surface.clear(self.sim.viewport);

        let viewport = self.sim.viewport;
        let pointer = self.sim.pointer.get();
        let model = self.sim.config.model;
        for circle in &mut self.sim.circles {
            step(circle, viewport, pointer, model);
            surface.fill_circle(circle.pos, circle.radius, circle.color);
        }
    }

    /// Viewport changed: remember the bounds and cancel-and-reschedule
    /// the debounce timer. A burst of resizes rebuilds the store once,
    /// with the bounds from the last event.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.pending_viewport = Some(viewport);
        if let Some(handle) = self.reset_timer.take() {
            self.sched.clear_timeout(handle);
        }
        self.reset_timer = Some(self.sched.set_timeout(self.debounce_ms));
    }

    /// Debounce timer fired; rebuild if the handle is still current.
    pub fn on_reset_timer(&mut self, handle: TimerHandle) {
        if self.reset_timer != Some(handle) {
            return;
        }
        self.reset_timer = None;
        if let Some(viewport) = self.pending_viewport.take() {
            self.sim.reset(viewport);
        }
    }

    /// Explicit reset (click): rebuild immediately against fresh bounds,
    /// dropping any pending debounced rebuild.
    pub fn on_reset_request(&mut self, viewport: Viewport) {
        if let Some(handle) = self.reset_timer.take() {
            self.sched.clear_timeout(handle);
        }
        self.pending_viewport = None;
        self.sim.reset(viewport);
    }

    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.sim.pointer.set(pos);
    }

    pub fn on_pointer_leave(&mut self) {
        self.sim.pointer.clear();
    }
}
