// Settings module
// Grid geometry and interaction tuning for the day view

use serde::{Deserialize, Serialize};

/// Day-view configuration. Every field has a default, so a partial
/// `config.toml` only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayViewConfig {
    /// Minutes per grid row (15, 30 or 60)
    pub slot_interval_minutes: u32,
    /// Height of one grid row in pixels
    pub slot_height_px: f32,
    /// Extra height of the separator drawn at each hour mark
    pub hour_border_height_px: f32,
    /// Pointer travel (either axis) before a press becomes a drag
    pub drag_threshold_px: f32,
    /// Precision of drop targets and resized durations
    pub snap_minutes: u32,
    pub scroll_debounce_ms: u64,
    pub scroll_storage_key: String,
    pub selected_date_storage_key: String,
    /// Hour the view scrolls to when nothing was persisted
    pub day_start_hour: u32,
}

impl Default for DayViewConfig {
    fn default() -> Self {
        Self {
            slot_interval_minutes: 30,
            slot_height_px: 32.0,
            hour_border_height_px: 2.0,
            drag_threshold_px: 5.0,
            snap_minutes: 15,
            scroll_debounce_ms: 150,
            scroll_storage_key: "day-view.scroll-top".to_string(),
            selected_date_storage_key: "day-view.selected-date".to_string(),
            day_start_hour: 8,
        }
    }
}

impl DayViewConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.slot_interval_minutes, 15 | 30 | 60) {
            return Err(format!(
                "slot_interval_minutes must be 15, 30 or 60, got {}",
                self.slot_interval_minutes
            ));
        }
        if self.snap_minutes == 0 || self.slot_interval_minutes % self.snap_minutes != 0 {
            return Err(format!(
                "snap_minutes ({}) must divide slot_interval_minutes ({})",
                self.snap_minutes, self.slot_interval_minutes
            ));
        }
        if !(self.slot_height_px.is_finite() && self.slot_height_px > 0.0) {
            return Err("slot_height_px must be positive".to_string());
        }
        if !(self.hour_border_height_px.is_finite() && self.hour_border_height_px >= 0.0) {
            return Err("hour_border_height_px cannot be negative".to_string());
        }
        if !(self.drag_threshold_px.is_finite() && self.drag_threshold_px >= 0.0) {
            return Err("drag_threshold_px cannot be negative".to_string());
        }
        if self.day_start_hour >= 24 {
            return Err("day_start_hour must be below 24".to_string());
        }
        if self.scroll_storage_key.trim().is_empty()
            || self.selected_date_storage_key.trim().is_empty()
        {
            return Err("storage keys cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn scroll_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.scroll_debounce_ms)
    }
}
