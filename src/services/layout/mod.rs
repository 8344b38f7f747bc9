//! Day layout engine.
//! Groups a date's bookings by overlap, assigns side-by-side columns inside
//! each group, and maps every booking to a pixel box on the day column.

use chrono::NaiveDate;

use crate::models::booking::{Booking, BookingId};
use crate::models::layout::{BoxGeometry, LayoutAssignment};

pub mod columns;
pub mod overlap;
pub mod position;

pub use columns::{assign_all, assign_columns};
pub use overlap::{bookings_overlap, conflicts_with, group_overlapping, Span};
pub use position::PositionMapper;

/// Everything the renderer needs to draw one booking block.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBooking {
    pub booking_id: BookingId,
    pub assignment: LayoutAssignment,
    pub geometry: BoxGeometry,
}

/// Layout of one date, recomputed whenever that date's bookings change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayLayout {
    pub date: Option<NaiveDate>,
    pub placements: Vec<PlacedBooking>,
}

impl DayLayout {
    /// Lay out the bookings of `date` found in `bookings`.
    /// Bookings on other dates and cancelled bookings are skipped.
    pub fn compute(date: NaiveDate, bookings: &[Booking], mapper: &PositionMapper) -> Self {
        let on_date: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.date == date && b.status.occupies_grid())
            .collect();

        let groups = group_overlapping(&on_date);
        let assignments = assign_all(&groups);

        let placements = assignments
            .into_iter()
            .filter_map(|assignment| {
                let booking = on_date.iter().find(|b| b.id == assignment.booking_id)?;
                Some(PlacedBooking {
                    booking_id: booking.id.clone(),
                    geometry: mapper.geometry(&booking.start_time, booking.duration_minutes),
                    assignment,
                })
            })
            .collect();

        log::debug!(
            "Laid out {} bookings in {} groups for {}",
            on_date.len(),
            groups.len(),
            date
        );

        Self {
            date: Some(date),
            placements,
        }
    }

    pub fn get(&self, id: &BookingId) -> Option<&PlacedBooking> {
        self.placements.iter().find(|p| &p.booking_id == id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
