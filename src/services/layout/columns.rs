//! Greedy column assignment inside an overlap group.
//!
//! Each booking goes into the leftmost column where it overlaps nothing
//! already placed. This is deterministic but not a minimal coloring: some
//! orderings open more columns than the largest set of simultaneous bookings.

use crate::models::booking::Booking;
use crate::models::layout::LayoutAssignment;

use super::overlap::{bookings_overlap, sort_by_start};

/// Assign columns to the members of one overlap group.
///
/// Every member of the group reports the same `total_columns`.
pub fn assign_columns(group: &[&Booking]) -> Vec<LayoutAssignment> {
    match group {
        [] => Vec::new(),
        [only] => vec![LayoutAssignment::single(only.id.clone())],
        _ => {
            let mut sorted = group.to_vec();
            sort_by_start(&mut sorted);

            let mut columns: Vec<Vec<&Booking>> = Vec::new();
            let mut placed: Vec<(&Booking, usize)> = Vec::with_capacity(sorted.len());

            for booking in sorted {
                let free = columns.iter().position(|column| {
                    column
                        .iter()
                        .all(|member| !bookings_overlap(member, booking))
                });
                let index = match free {
                    Some(index) => {
                        columns[index].push(booking);
                        index
                    }
                    None => {
                        columns.push(vec![booking]);
                        columns.len() - 1
                    }
                };
                placed.push((booking, index));
            }

            let total_columns = columns.len();
            placed
                .into_iter()
                .map(|(booking, column)| LayoutAssignment {
                    booking_id: booking.id.clone(),
                    column,
                    total_columns,
                })
                .collect()
        }
    }
}

/// Assign columns across every group of a date.
pub fn assign_all(groups: &[Vec<&Booking>]) -> Vec<LayoutAssignment> {
    groups
        .iter()
        .flat_map(|group| assign_columns(group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::{BookingId, Client};
    use crate::models::service_kind::ServiceKind;
    use crate::services::layout::overlap::group_overlapping;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn booking(id: &str, start: &str, minutes: u32) -> Booking {
        Booking::builder()
            .id(id)
            .service(ServiceKind::Haircut)
            .client(Client::new("c", "Client"))
            .date(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
            .start_time(start)
            .duration(minutes)
            .build()
            .unwrap()
    }

    fn find<'a>(assignments: &'a [LayoutAssignment], id: &str) -> &'a LayoutAssignment {
        assignments
            .iter()
            .find(|a| a.booking_id.as_str() == id)
            .unwrap()
    }

    #[test]
    fn test_single_member_group() {
        let a = booking("a", "10:00", 60);
        assert_eq!(
            assign_columns(&[&a]),
            vec![LayoutAssignment::single(BookingId::from("a"))]
        );
    }

    #[test]
    fn test_two_simultaneous_bookings_side_by_side() {
        let a = booking("a", "10:00", 60);
        let b = booking("b", "10:00", 60);
        let assignments = assign_columns(&[&a, &b]);
        assert_eq!(find(&assignments, "a").column, 0);
        assert_eq!(find(&assignments, "b").column, 1);
        assert!(assignments.iter().all(|a| a.total_columns == 2));
    }

    #[test]
    fn test_column_is_reused_after_member_ends() {
        // a: 10:00-11:00, b: 10:30-12:00, c: 11:00-11:30 reuses column 0
        let a = booking("a", "10:00", 60);
        let b = booking("b", "10:30", 90);
        let c = booking("c", "11:00", 30);
        let assignments = assign_columns(&[&a, &b, &c]);
        assert_eq!(find(&assignments, "a").column, 0);
        assert_eq!(find(&assignments, "b").column, 1);
        assert_eq!(find(&assignments, "c").column, 0);
        assert!(assignments.iter().all(|a| a.total_columns == 2));
    }

    #[test]
    fn test_chained_scenario() {
        let a = booking("A", "10:00", 120);
        let b = booking("B", "10:30", 60);
        let c = booking("C", "11:00", 60);
        let groups = group_overlapping(&[&a, &b, &c]);
        assert_eq!(groups.len(), 1);

        let assignments = assign_all(&groups);
        let total = find(&assignments, "A").total_columns;
        assert!(total >= 2);
        assert!(assignments.iter().all(|x| x.total_columns == total));
        assert_ne!(find(&assignments, "A").column, find(&assignments, "B").column);
        assert_ne!(find(&assignments, "A").column, find(&assignments, "C").column);
    }

    #[test]
    fn test_disjoint_plus_overlapping_mix() {
        let a = booking("A", "09:00", 60);
        let b = booking("B", "10:00", 90);
        let c = booking("C", "10:30", 60);
        let d = booking("D", "12:00", 60);
        let groups = group_overlapping(&[&a, &b, &c, &d]);
        let assignments = assign_all(&groups);

        assert_eq!(find(&assignments, "A").total_columns, 1);
        assert_eq!(find(&assignments, "D").total_columns, 1);
        assert_eq!(find(&assignments, "B").total_columns, 2);
        assert_eq!(find(&assignments, "C").total_columns, 2);
    }
}
