//! Time to pixel mapping for the day column.
//!
//! The grid draws a thicker separator at every hour mark. Each separator adds
//! `hour_border_height_px` to everything below it, so both the top offset and
//! the height of a booking block count the hour marks they cross.

use crate::models::layout::BoxGeometry;
use crate::models::settings::DayViewConfig;
use crate::utils::time::{to_minutes, MINUTES_PER_HOUR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMapper {
    pub slot_height_px: f32,
    pub slot_interval_minutes: u32,
    pub hour_border_height_px: f32,
}

impl PositionMapper {
    pub fn new(slot_height_px: f32, slot_interval_minutes: u32, hour_border_height_px: f32) -> Self {
        Self {
            slot_height_px,
            slot_interval_minutes,
            hour_border_height_px,
        }
    }

    pub fn from_config(config: &DayViewConfig) -> Self {
        Self::new(
            config.slot_height_px,
            config.slot_interval_minutes,
            config.hour_border_height_px,
        )
    }

    fn minutes_to_px(&self, minutes: u32) -> f32 {
        if self.slot_interval_minutes == 0 {
            return 0.0;
        }
        minutes as f32 / self.slot_interval_minutes as f32 * self.slot_height_px
    }

    /// Offset of a start time from the top of the day column.
    pub fn top_px(&self, start_time: &str) -> f32 {
        self.top_px_for_minutes(to_minutes(start_time))
    }

    pub fn top_px_for_minutes(&self, start: u32) -> f32 {
        self.minutes_to_px(start)
            + hour_marks_through(start) as f32 * self.hour_border_height_px
    }

    /// Height of a block starting at `start_time` and lasting `duration_minutes`.
    pub fn height_px(&self, start_time: &str, duration_minutes: u32) -> f32 {
        let start = to_minutes(start_time);
        self.minutes_to_px(duration_minutes)
            + internal_hour_marks(start, start.saturating_add(duration_minutes)) as f32
                * self.hour_border_height_px
    }

    pub fn geometry(&self, start_time: &str, duration_minutes: u32) -> BoxGeometry {
        BoxGeometry {
            top_px: self.top_px(start_time),
            height_px: self.height_px(start_time, duration_minutes),
        }
    }

    /// Total height of the day column, including every hour separator.
    pub fn day_height_px(&self) -> f32 {
        self.top_px_for_minutes(24 * MINUTES_PER_HOUR)
    }

    /// Inverse of [`Self::top_px_for_minutes`]: the minute a pixel offset falls in,
    /// clamped to the day.
    pub fn minutes_at(&self, y_px: f32) -> u32 {
        let interval = self.slot_interval_minutes;
        if interval == 0 {
            return 0;
        }
        let mut minutes = 0u32;
        while minutes < 24 * MINUTES_PER_HOUR
            && self.top_px_for_minutes(minutes.saturating_add(interval)) <= y_px
        {
            minutes = minutes.saturating_add(interval);
        }
        minutes.min((24 * MINUTES_PER_HOUR).saturating_sub(interval))
    }
}

/// Hour marks from midnight up to and including the one at or before `start`.
fn hour_marks_through(start: u32) -> u32 {
    start / MINUTES_PER_HOUR + 1
}

/// Hour marks strictly inside `(start, end)`; a mark at either edge is not counted.
pub fn internal_hour_marks(start: u32, end: u32) -> u32 {
    let first_inside = if start % MINUTES_PER_HOUR == 0 {
        start.saturating_add(MINUTES_PER_HOUR)
    } else {
        start.div_ceil(MINUTES_PER_HOUR).saturating_mul(MINUTES_PER_HOUR)
    };
    let last_inside = if end % MINUTES_PER_HOUR == 0 {
        match end.checked_sub(MINUTES_PER_HOUR) {
            Some(last) => last,
            None => return 0,
        }
    } else {
        end / MINUTES_PER_HOUR * MINUTES_PER_HOUR
    };

    if first_inside > last_inside {
        0
    } else {
        (last_inside - first_inside) / MINUTES_PER_HOUR + 1
    }
}
