// Time slot module
// One row of the day grid; regenerated per render, never persisted

/// A row in the day column, `interval` minutes tall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// `"HH:mm"` start of the slot
    pub time: String,
    /// True when the slot starts on the hour, which gets the thicker separator
    pub is_hour_start: bool,
}
