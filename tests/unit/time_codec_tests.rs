// Unit tests for the time-of-day codec and pixel mapping
// Covers the grid geometry the renderer depends on

use salon_day_view::models::settings::DayViewConfig;
use salon_day_view::services::layout::position::internal_hour_marks;
use salon_day_view::services::layout::PositionMapper;
use salon_day_view::utils::time::{generate_slots, parse_time, round_to_interval, to_time};
use test_case::test_case;

#[test_case("10:07", 15, "10:00"; "rounds down")]
#[test_case("10:08", 15, "10:15"; "rounds up")]
#[test_case("10:45", 30, "11:00"; "half rounds up")]
#[test_case("23:50", 15, "23:45"; "late evening")]
#[test_case("23:53", 15, "24:00"; "past midnight is not wrapped")]
fn test_round_to_interval(time: &str, interval: u32, expected: &str) {
    assert_eq!(round_to_interval(time, interval), expected);
}

#[test_case("24:00"; "hour out of range")]
#[test_case("10:60"; "minute out of range")]
#[test_case("9:30"; "missing padding")]
#[test_case("0930"; "missing separator")]
#[test_case(""; "empty")]
fn test_parse_time_rejects(time: &str) {
    assert_eq!(parse_time(time), None);
}

#[test]
fn test_slot_table_for_each_interval() {
    for (interval, count, hour_starts) in [(15, 96, 24), (30, 48, 24), (60, 24, 24)] {
        let slots = generate_slots(interval);
        assert_eq!(slots.len(), count);
        assert_eq!(slots.iter().filter(|s| s.is_hour_start).count(), hour_starts);
        assert_eq!(slots[0].time, "00:00");
        assert_eq!(slots.last().unwrap().time, to_time(24 * 60 - interval));
    }
}

#[test_case(600, 660, 0; "exactly one hour")]
#[test_case(630, 720, 1; "crosses one mark")]
#[test_case(600, 601, 0; "one minute")]
#[test_case(570, 750, 3; "spans three marks")]
fn test_internal_hour_marks(start: u32, end: u32, expected: u32) {
    assert_eq!(internal_hour_marks(start, end), expected);
}

#[test]
fn test_default_grid_geometry() {
    let mapper = PositionMapper::from_config(&DayViewConfig::default());

    // 20 slots of 32px plus the borders of the eleven marks 00:00 to 10:00
    assert_eq!(mapper.top_px("10:00"), 662.0);
    assert_eq!(mapper.top_px("00:00"), 2.0);
    assert_eq!(mapper.height_px("10:00", 60), 64.0);
    assert_eq!(mapper.height_px("10:30", 90), 98.0);
}

#[test]
fn test_quarter_hour_grid_geometry() {
    let config = DayViewConfig {
        slot_interval_minutes: 15,
        slot_height_px: 20.0,
        ..Default::default()
    };
    let mapper = PositionMapper::from_config(&config);
    assert_eq!(mapper.height_px("09:00", 45), 60.0);
    assert_eq!(mapper.height_px("09:45", 30), 42.0);
}
