// Booking Drag System
//
// Moves a booking to another slot by dragging it.
// - A press arms the controller; nothing is reported until the pointer has
//   travelled past the threshold, so taps stay clicks.
// - While dragging, each slot the pointer is over yields a snapped drop target.
// - Release applies the move to the store and hands back a pending commit.

use std::rc::Rc;

use chrono::NaiveDate;
use egui::{Pos2, Rect};

use super::commit::PendingCommit;
use super::pointer::{exceeds_threshold, PointerCapture, PointerEvent};
use crate::models::booking::{BookingId, BookingPatch};
use crate::models::layout::DropTarget;
use crate::models::settings::DayViewConfig;
use crate::services::booking_store::SharedStore;
use crate::services::persistence::BookingPort;
use crate::utils::time::{to_minutes, to_time};

/// Observable phase of the drag state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// Pressed on a booking, still under the movement threshold
    Armed,
    Dragging,
}

#[derive(Clone, Debug)]
struct DragSession {
    booking_id: BookingId,
    origin: Pos2,
    pointer: Pos2,
    original: DropTarget,
    target: Option<HoveredSlot>,
}

#[derive(Clone, Debug)]
struct HoveredSlot {
    date: NaiveDate,
    slot_time: String,
    target: DropTarget,
}

enum DragPhase {
    Idle,
    Armed(DragSession),
    Dragging(DragSession),
}

/// Snap a pointer inside a slot to a start time.
///
/// The upper half of the slot maps to the slot's own time and the lower half
/// to `snap_minutes` later, giving quarter-hour precision on a half-hour grid.
/// When the snap step is not finer than the slot, both halves map to the slot.
pub fn snap_to_slot(
    slot_time: &str,
    slot_rect: Rect,
    pointer: Pos2,
    slot_interval_minutes: u32,
    snap_minutes: u32,
) -> String {
    let base = to_minutes(slot_time);
    let lower_half = pointer.y >= slot_rect.center().y;
    if lower_half && snap_minutes > 0 && snap_minutes < slot_interval_minutes {
        to_time(base.saturating_add(snap_minutes))
    } else {
        to_time(base)
    }
}

pub struct DragController {
    store: SharedStore,
    port: Rc<dyn BookingPort>,
    capture: Box<dyn PointerCapture>,
    threshold_px: f32,
    slot_interval_minutes: u32,
    snap_minutes: u32,
    phase: DragPhase,
    on_drag_start: Option<Box<dyn FnMut(&BookingId)>>,
    on_drag_end: Option<Box<dyn FnMut()>>,
}

impl DragController {
    pub fn new(
        store: SharedStore,
        port: Rc<dyn BookingPort>,
        config: &DayViewConfig,
        capture: Box<dyn PointerCapture>,
    ) -> Self {
        Self {
            store,
            port,
            capture,
            threshold_px: config.drag_threshold_px,
            slot_interval_minutes: config.slot_interval_minutes,
            snap_minutes: config.snap_minutes,
            phase: DragPhase::Idle,
            on_drag_start: None,
            on_drag_end: None,
        }
    }

    /// Called once per interaction, when the threshold is crossed.
    pub fn on_drag_start(mut self, callback: impl FnMut(&BookingId) + 'static) -> Self {
        self.on_drag_start = Some(Box::new(callback));
        self
    }

    /// Called once when a started drag ends, whatever the outcome.
    pub fn on_drag_end(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_drag_end = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> DragState {
        match self.phase {
            DragPhase::Idle => DragState::Idle,
            DragPhase::Armed(_) => DragState::Armed,
            DragPhase::Dragging(_) => DragState::Dragging,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Booking under the pointer, armed or dragging.
    pub fn active_booking(&self) -> Option<&BookingId> {
        match &self.phase {
            DragPhase::Idle => None,
            DragPhase::Armed(s) | DragPhase::Dragging(s) => Some(&s.booking_id),
        }
    }

    /// Current snapped target, for drop highlighting.
    pub fn drop_target(&self) -> Option<&DropTarget> {
        match &self.phase {
            DragPhase::Dragging(session) => session.target.as_ref().map(|h| &h.target),
            _ => None,
        }
    }

    /// Last known pointer position while dragging, for drawing the ghost block.
    pub fn pointer_pos(&self) -> Option<Pos2> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session.pointer),
            _ => None,
        }
    }

    /// Press on a booking. Returns false if another interaction is live or the
    /// booking is not in the store.
    pub fn pointer_down(&mut self, booking_id: &BookingId, event: PointerEvent) -> bool {
        if !matches!(self.phase, DragPhase::Idle) {
            return false;
        }
        let original = {
            let store = self.store.borrow();
            let Some(booking) = store.get(booking_id) else {
                log::warn!("Drag requested for unknown booking {}", booking_id);
                return false;
            };
            DropTarget {
                date: booking.date,
                time: booking.start_time.clone(),
            }
        };

        self.capture.attach(event.kind);
        self.phase = DragPhase::Armed(DragSession {
            booking_id: booking_id.clone(),
            origin: event.pos,
            pointer: event.pos,
            original,
            target: None,
        });
        log::debug!("Armed drag for booking {}", booking_id);
        true
    }

    /// Window-wide pointer movement. Returns true when the event belongs to a
    /// drag in progress and the host should suppress its default handling
    /// (touch scrolling, text selection).
    pub fn pointer_move(&mut self, event: PointerEvent) -> bool {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        let (phase, consumed) = match phase {
            DragPhase::Idle => (DragPhase::Idle, false),
            DragPhase::Armed(mut session) => {
                session.pointer = event.pos;
                if exceeds_threshold(session.origin, event.pos, self.threshold_px) {
                    log::debug!("Drag started for booking {}", session.booking_id);
                    if let Some(callback) = self.on_drag_start.as_mut() {
                        callback(&session.booking_id);
                    }
                    (DragPhase::Dragging(session), true)
                } else {
                    (DragPhase::Armed(session), false)
                }
            }
            DragPhase::Dragging(mut session) => {
                session.pointer = event.pos;
                (DragPhase::Dragging(session), true)
            }
        };
        self.phase = phase;
        consumed
    }

    /// Pointer entered or moved within a slot. Returns the snapped target while dragging.
    pub fn slot_hover(
        &mut self,
        date: NaiveDate,
        slot_time: &str,
        slot_rect: Rect,
        pointer: Pos2,
    ) -> Option<DropTarget> {
        let interval = self.slot_interval_minutes;
        let snap = self.snap_minutes;
        let DragPhase::Dragging(session) = &mut self.phase else {
            return None;
        };
        let target = DropTarget {
            date,
            time: snap_to_slot(slot_time, slot_rect, pointer, interval, snap),
        };
        session.pointer = pointer;
        session.target = Some(HoveredSlot {
            date,
            slot_time: slot_time.to_string(),
            target: target.clone(),
        });
        Some(target)
    }

    /// Pointer left a slot; clears the target if it came from that slot.
    pub fn slot_leave(&mut self, date: NaiveDate, slot_time: &str) {
        if let DragPhase::Dragging(session) = &mut self.phase {
            if session
                .target
                .as_ref()
                .is_some_and(|h| h.date == date && h.slot_time == slot_time)
            {
                session.target = None;
            }
        }
    }

    /// Release. A press that never crossed the threshold ends quietly (it was
    /// a click). A drag over a new slot applies the move to the store and
    /// returns the commit to persist.
    pub fn pointer_up(&mut self) -> Option<PendingCommit> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Idle => None,
            DragPhase::Armed(session) => {
                self.capture.detach();
                log::debug!("Press on booking {} ended without a drag", session.booking_id);
                None
            }
            DragPhase::Dragging(session) => {
                self.capture.detach();
                let commit = match session.target {
                    Some(hovered) if hovered.target != session.original => {
                        log::info!(
                            "Moving booking {} to {} {}",
                            session.booking_id,
                            hovered.target.date,
                            hovered.target.time
                        );
                        PendingCommit::apply(
                            &self.store,
                            &self.port,
                            session.booking_id.clone(),
                            BookingPatch::reschedule(hovered.target.date, hovered.target.time),
                        )
                    }
                    _ => None,
                };
                self.finish_drag();
                commit
            }
        }
    }

    /// Abort without moving anything.
    pub fn cancel(&mut self) {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Idle => {}
            DragPhase::Armed(_) => self.capture.detach(),
            DragPhase::Dragging(_) => {
                self.capture.detach();
                self.finish_drag();
            }
        }
    }

    fn finish_drag(&mut self) {
        if let Some(callback) = self.on_drag_end.as_mut() {
            callback();
        }
    }
}
