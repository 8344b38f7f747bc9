//! Unified mouse/touch input for the day view's drag and resize interactions.
//!
//! Hosts translate their native events into [`PointerEvent`]s. While an
//! interaction is live the controllers ask a [`PointerCapture`] to route
//! window-wide move/up events to them, and release it when they finish.

use std::cell::Cell;
use std::rc::Rc;

use egui::{Pos2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Pos2,
}

impl PointerEvent {
    pub fn mouse(pos: Pos2) -> Self {
        Self {
            kind: PointerKind::Mouse,
            pos,
        }
    }

    /// Build from a touch event; only the first touch point drives the interaction.
    pub fn touch(touches: &[Pos2]) -> Option<Self> {
        touches.first().map(|&pos| Self {
            kind: PointerKind::Touch,
            pos,
        })
    }
}

/// True once the pointer has travelled `threshold` pixels on either axis.
pub fn exceeds_threshold(origin: Pos2, pos: Pos2, threshold: f32) -> bool {
    let delta: Vec2 = pos - origin;
    delta.x.abs() >= threshold || delta.y.abs() >= threshold
}

/// Source of window-wide pointer events. `attach` is called when an
/// interaction starts and `detach` exactly once when it ends or is cancelled.
pub trait PointerCapture {
    fn attach(&mut self, kind: PointerKind);
    fn detach(&mut self);
}

/// For hosts that already deliver every pointer event to the controllers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn attach(&mut self, _kind: PointerKind) {}
    fn detach(&mut self) {}
}

/// Capture that counts live listener sets. Clones share the counters, so a
/// host can keep one and hand another to a controller to check for leaks.
#[derive(Debug, Default, Clone)]
pub struct TrackedCapture {
    live: Rc<Cell<usize>>,
    attached_total: Rc<Cell<usize>>,
}

impl TrackedCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener sets currently attached.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Listener sets attached over the lifetime of the capture.
    pub fn attached_total(&self) -> usize {
        self.attached_total.get()
    }
}

impl PointerCapture for TrackedCapture {
    fn attach(&mut self, kind: PointerKind) {
        log::debug!("Attaching global {:?} listeners", kind);
        self.live.set(self.live.get() + 1);
        self.attached_total.set(self.attached_total.get() + 1);
    }

    fn detach(&mut self) {
        log::debug!("Detaching global pointer listeners");
        self.live.set(self.live.get().saturating_sub(1));
    }
}
