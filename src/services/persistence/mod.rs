//! Persistence port consumed by the day view.
//!
//! The controllers only see [`BookingPort`]; the host injects whichever
//! implementation it has (SQLite here, an HTTP client elsewhere).

use async_trait::async_trait;
use thiserror::Error;

use crate::models::booking::{Booking, BookingId, BookingPatch, NewBooking};

pub mod sqlite;

pub use sqlite::SqliteBookingRepository;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("booking {0} not found")]
    NotFound(BookingId),
    #[error("invalid booking: {0}")]
    Invalid(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for PortError {
    fn from(err: anyhow::Error) -> Self {
        PortError::Storage(format!("{:#}", err))
    }
}

/// Source of truth for bookings. All calls are single attempts; callers decide
/// how to reconcile on failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait BookingPort {
    async fn fetch_all(&self) -> Result<Vec<Booking>, PortError>;

    /// Merge `patch` into the stored booking and return the stored result.
    async fn update_booking(
        &self,
        id: &BookingId,
        patch: &BookingPatch,
    ) -> Result<Booking, PortError>;

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, PortError>;

    async fn delete_booking(&self, id: &BookingId) -> Result<(), PortError>;
}
