// Interaction module
// Pointer gestures, slot events and scroll synchronisation for the day view

pub mod commit;
pub mod drag;
pub mod pointer;
pub mod resize;
pub mod scroll_sync;
pub mod slots;

pub use commit::{create_booking, delete_booking, reload_from_source, CommitOutcome, PendingCommit};
pub use drag::{DragController, DragState};
pub use pointer::{PointerCapture, PointerEvent, PointerKind};
pub use resize::{ResizeController, ResizePreview};
pub use scroll_sync::{ScrollSynchronizer, ScrollViewport};
pub use slots::{handle_slot_event, DaySlot, SlotAction, SlotEvent, SlotResponse};
