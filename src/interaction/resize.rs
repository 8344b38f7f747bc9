// Booking Resize System
//
// Changes a booking's duration by dragging the handle on its bottom edge.
// Pointer travel is converted to minutes, clamped to at least one slot and
// snapped to the quarter hour. Only the preview changes until release.

use std::rc::Rc;

use super::commit::PendingCommit;
use super::pointer::{PointerCapture, PointerEvent};
use crate::models::booking::{BookingId, BookingPatch};
use crate::models::settings::DayViewConfig;
use crate::services::booking_store::SharedStore;
use crate::services::layout::PositionMapper;
use crate::services::persistence::BookingPort;
use crate::utils::time::round_minutes;

/// Live preview of the block being resized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizePreview {
    pub duration_minutes: u32,
    pub height_px: f32,
}

#[derive(Clone, Debug)]
struct ResizeSession {
    booking_id: BookingId,
    start_y: f32,
    start_time: String,
    original_duration: u32,
    preview_duration: u32,
}

/// Duration after dragging the handle `delta_y` pixels.
///
/// Always a multiple of `snap_minutes` and never shorter than one slot,
/// whatever the input (including non-finite deltas).
pub fn snapped_duration(
    original_minutes: u32,
    delta_y: f32,
    slot_height_px: f32,
    slot_interval_minutes: u32,
    snap_minutes: u32,
) -> u32 {
    // `as` saturates and maps NaN to zero
    let delta_minutes =
        (delta_y / slot_height_px * slot_interval_minutes as f32).round() as i64;
    let candidate = (original_minutes as i64)
        .saturating_add(delta_minutes)
        .max(slot_interval_minutes as i64)
        .min(i64::from(u32::MAX / 2)) as u32;
    round_minutes(candidate, snap_minutes)
}

pub struct ResizeController {
    store: SharedStore,
    port: Rc<dyn BookingPort>,
    capture: Box<dyn PointerCapture>,
    mapper: PositionMapper,
    snap_minutes: u32,
    session: Option<ResizeSession>,
    on_resize_start: Option<Box<dyn FnMut(&BookingId)>>,
    on_resize_end: Option<Box<dyn FnMut()>>,
}

impl ResizeController {
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
            mapper: PositionMapper::from_config(config),
            snap_minutes: config.snap_minutes,
            session: None,
            on_resize_start: None,
            on_resize_end: None,
        }
    }

    /// Hosts use this to suspend competing gestures (carousel paging, drag).
    pub fn on_resize_start(mut self, callback: impl FnMut(&BookingId) + 'static) -> Self {
        self.on_resize_start = Some(Box::new(callback));
        self
    }

    pub fn on_resize_end(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_resize_end = Some(Box::new(callback));
        self
    }

    pub fn is_resizing(&self) -> bool {
        self.session.is_some()
    }

    /// Check if resizing a specific booking
    pub fn is_resizing_booking(&self, id: &BookingId) -> bool {
        self.session.as_ref().is_some_and(|s| &s.booking_id == id)
    }

    pub fn preview(&self) -> Option<ResizePreview> {
        self.session.as_ref().map(|s| self.preview_for(s))
    }

    fn preview_for(&self, session: &ResizeSession) -> ResizePreview {
        ResizePreview {
            duration_minutes: session.preview_duration,
            height_px: self
                .mapper
                .height_px(&session.start_time, session.preview_duration),
        }
    }

    /// Press on a booking's resize handle.
    pub fn begin(&mut self, booking_id: &BookingId, event: PointerEvent) -> bool {
        if self.session.is_some() {
            return false;
        }
        let (start_time, duration) = {
            let store = self.store.borrow();
            let Some(booking) = store.get(booking_id) else {
                log::warn!("Resize requested for unknown booking {}", booking_id);
                return false;
            };
            (booking.start_time.clone(), booking.duration_minutes)
        };

        self.capture.attach(event.kind);
        self.session = Some(ResizeSession {
            booking_id: booking_id.clone(),
            start_y: event.pos.y,
            start_time,
            original_duration: duration,
            preview_duration: duration,
        });
        log::debug!("Resize started for booking {} at {}m", booking_id, duration);
        if let Some(callback) = self.on_resize_start.as_mut() {
            callback(booking_id);
        }
        true
    }

    /// Track the handle. Returns the updated preview while resizing.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<ResizePreview> {
        let slot_height = self.mapper.slot_height_px;
        let interval = self.mapper.slot_interval_minutes;
        let snap = self.snap_minutes;
        let session = self.session.as_mut()?;
        session.preview_duration = snapped_duration(
            session.original_duration,
            event.pos.y - session.start_y,
            slot_height,
            interval,
            snap,
        );
        let session = session.clone();
        Some(self.preview_for(&session))
    }

    /// Release the handle. If the duration changed, applies it to the store and
    /// returns the commit to persist.
    pub fn release(&mut self) -> Option<PendingCommit> {
        let session = self.session.take()?;
        self.capture.detach();

        let commit = if session.preview_duration != session.original_duration {
            log::info!(
                "Resizing booking {} from {}m to {}m",
                session.booking_id,
                session.original_duration,
                session.preview_duration
            );
            PendingCommit::apply(
                &self.store,
                &self.port,
                session.booking_id,
                BookingPatch::resize(session.preview_duration),
            )
        } else {
            None
        };

        self.finish();
        commit
    }

    /// Abort, leaving the booking untouched.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            self.capture.detach();
            self.finish();
        }
    }

    fn finish(&mut self) {
        if let Some(callback) = self.on_resize_end.as_mut() {
            callback();
        }
    }
}
