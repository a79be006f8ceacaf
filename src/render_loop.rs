//! Frame scheduling and the redraw loop.
//!
//! The loop never talks to a display directly. It asks a [`Scheduler`] for
//! the next tick, which lets the desktop host fire ticks once per presented
//! frame and lets tests fire them by hand.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, info};

use crate::surface::PixelSurface;

pub type TickCallback = Box<dyn FnOnce()>;

/// Identifies a scheduled tick so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

pub trait Scheduler {
    /// Arrange for `callback` to run on the next display refresh.
    fn schedule_tick(&self, callback: TickCallback) -> TickHandle;

    /// Drop a tick that has not fired yet. Unknown handles are ignored.
    fn cancel_tick(&self, handle: TickHandle);
}

// ============================================================================
// FRAME QUEUE
// ============================================================================

#[derive(Default)]
struct QueueInner {
    next_id: u64,
    pending: Vec<(TickHandle, TickCallback)>,
}

/// In-process scheduler whose ticks fire when the owner calls
/// [`FrameQueue::run_frame`].
#[derive(Clone, Default)]
pub struct FrameQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Fire every tick scheduled before this call and return how many ran.
    /// Ticks scheduled by those callbacks wait for the next frame.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut self.inner.borrow_mut().pending);
        let fired = due.len();
        for (_, callback) in due {
            callback();
        }
        fired
    }
}

impl Scheduler for FrameQueue {
    fn schedule_tick(&self, callback: TickCallback) -> TickHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let handle = TickHandle(inner.next_id);
        inner.pending.push((handle, callback));
        handle
    }

    fn cancel_tick(&self, handle: TickHandle) {
        self.inner
            .borrow_mut()
            .pending
            .retain(|(pending, _)| *pending != handle);
    }
}

// ============================================================================
// RENDER LOOP
// ============================================================================

pub type DrawFn = Box<dyn FnMut(&mut PixelSurface, u64)>;

struct LoopState {
    surface: Rc<RefCell<PixelSurface>>,
    draw: DrawFn,
    frame: u64,
    pending: Option<TickHandle>,
    epoch: u64,
}

/// Calls a draw function once per scheduled tick until stopped.
///
/// Each started lifecycle gets a fresh epoch. A tick only draws when its
/// epoch is still the live one, so a tick that was already handed out by the
/// scheduler can never draw after [`RenderLoop::stop`] returns.
pub struct RenderLoop<S: Scheduler + Clone + 'static> {
    scheduler: S,
    state: Option<Rc<RefCell<LoopState>>>,
    live_epoch: Rc<Cell<u64>>,
}

impl<S: Scheduler + Clone + 'static> RenderLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: None,
            live_epoch: Rc::new(Cell::new(0)),
        }
    }

    /// Begin drawing into `surface`. The frame counter handed to `draw`
    /// starts at 1. Starting a running loop stops it first.
    pub fn start<F>(&mut self, surface: Rc<RefCell<PixelSurface>>, draw: F)
    where
        F: FnMut(&mut PixelSurface, u64) + 'static,
    {
        self.stop();

        let epoch = self.live_epoch.get() + 1;
        self.live_epoch.set(epoch);

        let state = Rc::new(RefCell::new(LoopState {
            surface,
            draw: Box::new(draw),
            frame: 0,
            pending: None,
            epoch,
        }));
        schedule_next(&self.scheduler, &state, &self.live_epoch);
        self.state = Some(state);
        info!(epoch, "render loop started");
    }

    /// Cancel the pending tick and end the lifecycle. Idempotent.
    pub fn stop(&mut self) {
        let Some(state) = self.state.take() else {
            return;
        };
        self.live_epoch.set(self.live_epoch.get() + 1);
        let mut state = state.borrow_mut();
        if let Some(handle) = state.pending.take() {
            self.scheduler.cancel_tick(handle);
        }
        info!(frames = state.frame, "render loop stopped");
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    /// Frames drawn in the current lifecycle, zero when stopped.
    pub fn frames_drawn(&self) -> u64 {
        self.state.as_ref().map_or(0, |state| state.borrow().frame)
    }
}

impl<S: Scheduler + Clone + 'static> Drop for RenderLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_next<S: Scheduler + Clone + 'static>(
    scheduler: &S,
    state: &Rc<RefCell<LoopState>>,
    live_epoch: &Rc<Cell<u64>>,
) {
    let weak: Weak<RefCell<LoopState>> = Rc::downgrade(state);
    let epoch = state.borrow().epoch;
    let next_scheduler = scheduler.clone();
    let live = Rc::clone(live_epoch);

    let handle = scheduler.schedule_tick(Box::new(move || {
        let Some(state) = weak.upgrade() else {
            return;
        };
        if live.get() != epoch {
            debug!(epoch, "dropping tick from a stopped lifecycle");
            return;
        }
        tick(&state);
        // The draw may have ended this lifecycle.
        if live.get() == epoch {
            schedule_next(&next_scheduler, &state, &live);
        }
    }));
    state.borrow_mut().pending = Some(handle);
}

fn tick(state: &Rc<RefCell<LoopState>>) {
    let mut state = state.borrow_mut();
    state.pending = None;
    state.frame += 1;
    let frame = state.frame;

    let surface = Rc::clone(&state.surface);
    let mut surface = surface.borrow_mut();
    surface.clear();
    (state.draw)(&mut surface, frame);
}
