//! Per-slot interaction surface of the day column.
//!
//! The renderer reports what happened on a slot; this module turns it into
//! either a request to create a booking there or drag-target updates.

use chrono::NaiveDate;
use egui::{Key, Pos2, Rect};

use super::commit::PendingCommit;
use super::drag::DragController;
use crate::models::layout::DropTarget;

/// A rendered grid row.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot {
    pub date: NaiveDate,
    /// `"HH:mm"`
    pub time: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotEvent {
    Click,
    Key(Key),
    PointerEnter(Pos2),
    PointerMove(Pos2),
    PointerLeave,
    PointerUp(Pos2),
}

/// Host-level request raised by a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAction {
    /// Open the creation flow prefilled with this date and time
    Create { date: NaiveDate, time: String },
}

#[derive(Default)]
pub struct SlotResponse {
    pub action: Option<SlotAction>,
    pub drop_target: Option<DropTarget>,
    pub commit: Option<PendingCommit>,
}

/// Route one slot event. Clicks and Enter/Space are ignored while a drag is
/// live so releasing a dragged booking never also opens the creation flow.
pub fn handle_slot_event(
    drag: &mut DragController,
    slot: &DaySlot,
    event: SlotEvent,
) -> SlotResponse {
    let mut response = SlotResponse::default();
    match event {
        SlotEvent::Click | SlotEvent::Key(Key::Enter | Key::Space) => {
            if drag.active_booking().is_none() {
                response.action = Some(SlotAction::Create {
                    date: slot.date,
                    time: slot.time.clone(),
                });
            }
        }
        SlotEvent::Key(_) => {}
        SlotEvent::PointerEnter(pos) | SlotEvent::PointerMove(pos) => {
            response.drop_target = drag.slot_hover(slot.date, &slot.time, slot.rect, pos);
        }
        SlotEvent::PointerLeave => drag.slot_leave(slot.date, &slot.time),
        SlotEvent::PointerUp(pos) => {
            response.drop_target = drag.slot_hover(slot.date, &slot.time, slot.rect, pos);
            response.commit = drag.pointer_up();
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::pointer::{NoCapture, PointerEvent};
    use crate::models::booking::{Booking, BookingId, Client};
    use crate::models::service_kind::ServiceKind;
    use crate::models::settings::DayViewConfig;
    use crate::services::booking_store::{BookingStore, SharedStore};
    use crate::services::persistence::{BookingPort, MockBookingPort};
    use egui::{pos2, vec2};
    use std::rc::Rc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn controller() -> (DragController, SharedStore) {
        let booking = Booking::builder()
            .id("a")
            .service(ServiceKind::Manicure)
            .client(Client::new("c", "Client"))
            .date(day())
            .start_time("09:00")
            .duration(45)
            .build()
            .unwrap();
        let store = BookingStore::with_bookings(vec![booking]).shared();
        let port: Rc<dyn BookingPort> = Rc::new(MockBookingPort::new());
        let drag = DragController::new(
            Rc::clone(&store),
            port,
            &DayViewConfig::default(),
            Box::new(NoCapture),
        );
        (drag, store)
    }

    fn slot(time: &str, top: f32) -> DaySlot {
        DaySlot {
            date: day(),
            time: time.to_string(),
            rect: Rect::from_min_size(pos2(0.0, top), vec2(120.0, 32.0)),
        }
    }

    #[test]
    fn test_click_and_keyboard_request_creation() {
        let (mut drag, _) = controller();
        let slot = slot("14:00", 0.0);
        let expected = Some(SlotAction::Create {
            date: day(),
            time: "14:00".to_string(),
        });

        assert_eq!(handle_slot_event(&mut drag, &slot, SlotEvent::Click).action, expected);
        assert_eq!(
            handle_slot_event(&mut drag, &slot, SlotEvent::Key(Key::Enter)).action,
            expected
        );
        assert_eq!(
            handle_slot_event(&mut drag, &slot, SlotEvent::Key(Key::Space)).action,
            expected
        );
        assert_eq!(
            handle_slot_event(&mut drag, &slot, SlotEvent::Key(Key::A)).action,
            None
        );
    }

    #[test]
    fn test_pointer_up_on_slot_drops_booking() {
        let (mut drag, store) = controller();
        let id = BookingId::from("a");
        drag.pointer_down(&id, PointerEvent::mouse(pos2(10.0, 10.0)));
        drag.pointer_move(PointerEvent::mouse(pos2(10.0, 40.0)));

        let target_slot = slot("13:00", 100.0);
        let entered = handle_slot_event(&mut drag, &target_slot, SlotEvent::PointerEnter(pos2(10.0, 105.0)));
        assert_eq!(entered.drop_target.unwrap().time, "13:00");

        // Clicks during a drag do not open the creation flow
        assert!(handle_slot_event(&mut drag, &target_slot, SlotEvent::Click).action.is_none());

        let released = handle_slot_event(&mut drag, &target_slot, SlotEvent::PointerUp(pos2(10.0, 125.0)));
        assert_eq!(released.drop_target.unwrap().time, "13:15");
        assert!(released.commit.is_some());
        assert_eq!(store.borrow().get(&id).unwrap().start_time, "13:15");
    }
}
