// Layout module
// Derived, transient values produced by the layout engine and the drag state machine

use chrono::NaiveDate;

use crate::models::booking::BookingId;

/// Horizontal placement of one booking inside its overlap group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutAssignment {
    pub booking_id: BookingId,
    /// Zero-based column index
    pub column: usize,
    /// Number of columns the group is split into (always >= 1)
    pub total_columns: usize,
}

impl LayoutAssignment {
    pub fn single(booking_id: BookingId) -> Self {
        Self {
            booking_id,
            column: 0,
            total_columns: 1,
        }
    }

    /// Left edge as a fraction of the day column width.
    pub fn left_fraction(&self) -> f32 {
        self.column as f32 / self.total_columns.max(1) as f32
    }

    /// Width as a fraction of the day column width.
    pub fn width_fraction(&self) -> f32 {
        1.0 / self.total_columns.max(1) as f32
    }
}

/// Vertical placement of a booking block, in pixels from the top of the day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub top_px: f32,
    pub height_px: f32,
}

impl BoxGeometry {
    pub fn bottom_px(&self) -> f32 {
        self.top_px + self.height_px
    }
}

/// The snapped slot a dragged booking would land on if released now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub date: NaiveDate,
    /// `"HH:mm"`
    pub time: String,
}
