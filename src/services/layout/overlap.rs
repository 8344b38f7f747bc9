//! Overlap detection and grouping of a day's bookings.
//!
//! Bookings are half-open intervals `[start, end)` in minutes since midnight,
//! so a booking ending at 10:00 does not overlap one starting at 10:00.

use crate::models::booking::Booking;

/// Half-open minute range of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn of(booking: &Booking) -> Self {
        Self {
            start: booking.start_minutes(),
            end: booking.end_minutes(),
        }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// True when two distinct bookings share any minute. A booking never overlaps itself.
pub fn bookings_overlap(a: &Booking, b: &Booking) -> bool {
    a.id != b.id && Span::of(a).overlaps(&Span::of(b))
}

/// Stable sort by start time; equal starts keep their input order.
pub fn sort_by_start(bookings: &mut [&Booking]) {
    bookings.sort_by_key(|b| b.start_minutes());
}

/// Partition one date's bookings into groups connected by overlap.
///
/// Bookings are visited in start order and each joins the first existing group
/// holding any member it overlaps, so members can be linked through a chain
/// of overlaps without overlapping each other directly.
pub fn group_overlapping<'a>(bookings: &[&'a Booking]) -> Vec<Vec<&'a Booking>> {
    let mut sorted = bookings.to_vec();
    sort_by_start(&mut sorted);

    let mut groups: Vec<Vec<&'a Booking>> = Vec::new();
    for booking in sorted {
        let target = groups
            .iter()
            .position(|group| group.iter().any(|member| bookings_overlap(member, booking)));

        match target {
            Some(index) => groups[index].push(booking),
            None => groups.push(vec![booking]),
        }
    }
    groups
}

/// Bookings in `others` that overlap `booking`, excluding `booking` itself.
/// Cancelled bookings never conflict.
pub fn conflicts_with<'a>(booking: &Booking, others: &'a [Booking]) -> Vec<&'a Booking> {
    if !booking.status.occupies_grid() {
        return Vec::new();
    }
    others
        .iter()
        .filter(|other| {
            other.date == booking.date
                && other.status.occupies_grid()
                && bookings_overlap(booking, other)
        })
        .collect()
}
