// Time-of-day codec
// Converts "HH:mm" strings to minutes since midnight and back, and builds the
// slot table a day column is rendered from.

use crate::models::time_slot::TimeSlot;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Default rounding step used by [`round_to_interval`] callers.
pub const DEFAULT_ROUNDING_MINUTES: u32 = 15;

/// Parse an `"HH:mm"` string into minutes since midnight.
///
/// Callers are expected to pass well-formed values. A missing or garbled
/// component counts as zero rather than failing; use [`parse_time`] where the
/// input has not been validated yet.
///
/// # Examples
/// ```
/// use salon_day_view::utils::time::to_minutes;
/// assert_eq!(to_minutes("10:30"), 630);
/// assert_eq!(to_minutes("00:00"), 0);
/// ```
pub fn to_minutes(time: &str) -> u32 {
    let mut parts = time.splitn(2, ':');
    let hours = parts
        .next()
        .and_then(|h| h.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let minutes = parts
        .next()
        .and_then(|m| m.trim().parse::<u32>().ok())
        .unwrap_or(0);
    hours.saturating_mul(MINUTES_PER_HOUR).saturating_add(minutes)
}

/// Strict variant of [`to_minutes`]: accepts only `HH:mm` with `HH < 24` and `mm < 60`.
pub fn parse_time(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours >= 24 || minutes >= MINUTES_PER_HOUR {
        return None;
    }
    Some(hours * MINUTES_PER_HOUR + minutes)
}

/// Format minutes since midnight as a zero-padded `"HH:mm"` string.
///
/// Values past midnight are not wrapped (`1470` formats as `"24:30"`), so an
/// end time that runs over the day boundary stays visible as such.
pub fn to_time(minutes: u32) -> String {
    format!(
        "{:02}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}

/// Round a time to the nearest multiple of `interval` minutes (half rounds up).
pub fn round_to_interval(time: &str, interval: u32) -> String {
    to_time(round_minutes(to_minutes(time), interval))
}

/// Integer form of [`round_to_interval`].
pub fn round_minutes(minutes: u32, interval: u32) -> u32 {
    if interval == 0 {
        return minutes;
    }
    (minutes + interval / 2) / interval * interval
}

/// Build the slot table for one day: `1440 / interval` entries starting at midnight.
pub fn generate_slots(interval: u32) -> Vec<TimeSlot> {
    if interval == 0 {
        return Vec::new();
    }
    (0..MINUTES_PER_DAY / interval)
        .map(|index| {
            let minutes = index * interval;
            TimeSlot {
                time: to_time(minutes),
                is_hour_start: minutes % MINUTES_PER_HOUR == 0,
            }
        })
        .collect()
}
