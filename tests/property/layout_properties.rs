// Property-based tests for the layout engine
// Checks overlap grouping, column assignment and snapping with random days

use chrono::NaiveDate;
use proptest::prelude::*;
use salon_day_view::interaction::resize::snapped_duration;
use salon_day_view::models::booking::{Booking, Client};
use salon_day_view::models::service_kind::ServiceKind;
use salon_day_view::services::layout::{assign_all, bookings_overlap, group_overlapping};
use salon_day_view::utils::time::{to_minutes, to_time};

fn day_of(spans: &[(u32, u32)]) -> Vec<Booking> {
    spans
        .iter()
        .enumerate()
        .map(|(i, &(start, duration))| {
            Booking::builder()
                .id(format!("b{}", i))
                .service(ServiceKind::Waxing)
                .client(Client::new("c", "Client"))
                .date(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
                .start_time(to_time(start))
                .duration(duration)
                .build()
                .unwrap()
        })
        .collect()
}

/// Start on a quarter hour between 06:00 and 20:00, lasting 15 minutes to 4 hours
fn span() -> impl Strategy<Value = (u32, u32)> {
    (24u32..80, 1u32..=16).prop_map(|(q, d)| (q * 15, d * 15))
}

proptest! {
    /// Property: bookings in the same column never overlap, and every booking
    /// gets exactly one column inside its group's width
    #[test]
    fn prop_columns_never_hold_overlapping_bookings(spans in prop::collection::vec(span(), 0..24)) {
        let bookings = day_of(&spans);
        let refs: Vec<&Booking> = bookings.iter().collect();
        let groups = group_overlapping(&refs);
        let assignments = assign_all(&groups);

        prop_assert_eq!(assignments.len(), bookings.len());
        for a in &assignments {
            prop_assert!(a.column < a.total_columns);
        }
        for (i, a) in assignments.iter().enumerate() {
            for b in &assignments[i + 1..] {
                let ba = bookings.iter().find(|x| x.id == a.booking_id).unwrap();
                let bb = bookings.iter().find(|x| x.id == b.booking_id).unwrap();
                if bookings_overlap(ba, bb) {
                    prop_assert_ne!(a.column, b.column);
                    prop_assert_eq!(a.total_columns, b.total_columns);
                }
            }
        }
    }

    /// Property: bookings in different groups never overlap
    #[test]
    fn prop_groups_are_separated(spans in prop::collection::vec(span(), 0..24)) {
        let bookings = day_of(&spans);
        let refs: Vec<&Booking> = bookings.iter().collect();
        let groups = group_overlapping(&refs);

        prop_assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), bookings.len());
        for (i, left) in groups.iter().enumerate() {
            for right in &groups[i + 1..] {
                for a in left {
                    for b in right {
                        prop_assert!(!bookings_overlap(a, b));
                    }
                }
            }
        }
    }

    /// Property: back-to-back bookings each fill the full column width
    #[test]
    fn prop_disjoint_bookings_take_full_width(durations in prop::collection::vec(1u32..=4, 1..12)) {
        let mut start = 8 * 60;
        let spans: Vec<(u32, u32)> = durations
            .iter()
            .map(|d| {
                let span = (start, d * 15);
                start += d * 15;
                span
            })
            .collect();
        let bookings = day_of(&spans);
        let refs: Vec<&Booking> = bookings.iter().collect();
        let assignments = assign_all(&group_overlapping(&refs));

        for a in assignments {
            prop_assert_eq!((a.column, a.total_columns), (0, 1));
        }
    }

    /// Property: overlap is symmetric and a booking never overlaps itself
    #[test]
    fn prop_overlap_symmetric_and_irreflexive(a in span(), b in span()) {
        let bookings = day_of(&[a, b]);
        prop_assert_eq!(
            bookings_overlap(&bookings[0], &bookings[1]),
            bookings_overlap(&bookings[1], &bookings[0])
        );
        prop_assert!(!bookings_overlap(&bookings[0], &bookings[0]));
    }

    /// Property: resized durations are quarter hours and at least one slot long
    #[test]
    fn prop_resize_snaps_to_quarter_hours(
        original in (2u32..=32).prop_map(|q| q * 15),
        delta_y in -2000.0f32..2000.0,
    ) {
        let duration = snapped_duration(original, delta_y, 32.0, 30, 15);
        prop_assert_eq!(duration % 15, 0);
        prop_assert!(duration >= 30);
    }

    /// Property: formatting then parsing a time of day is lossless
    #[test]
    fn prop_time_round_trip(minutes in 0u32..1440) {
        prop_assert_eq!(to_minutes(&to_time(minutes)), minutes);
    }
}
