// Test fixtures - reusable test data
// Provides consistent bookings and an in-memory persistence port across test files

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use salon_day_view::models::booking::{Booking, BookingId, BookingPatch, Client, NewBooking};
use salon_day_view::models::service_kind::ServiceKind;
use salon_day_view::services::persistence::{BookingPort, PortError};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday June 2, 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    pub fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }
}

/// Sample bookings for testing
pub mod bookings {
    use super::*;

    pub fn booking(id: &str, start: &str, minutes: u32) -> Booking {
        booking_on(id, dates::monday(), start, minutes)
    }

    pub fn booking_on(id: &str, date: NaiveDate, start: &str, minutes: u32) -> Booking {
        Booking::builder()
            .id(id)
            .service(ServiceKind::Haircut)
            .client(Client::new(format!("client-{}", id), format!("Client {}", id)))
            .date(date)
            .start_time(start)
            .duration(minutes)
            .build()
            .unwrap()
    }

    /// A busy Monday: a chain of overlaps in the morning and a lone
    /// booking in the afternoon
    pub fn busy_monday() -> Vec<Booking> {
        vec![
            booking("wash", "09:00", 60),
            booking("cut", "09:30", 60),
            booking("color", "10:00", 120),
            booking("nails", "10:30", 30),
            booking("facial", "15:00", 60),
        ]
    }

    pub fn new_booking(start: &str) -> NewBooking {
        Booking::builder()
            .service(ServiceKind::Facial)
            .client(Client::new("walk-in", "Walk In"))
            .date(dates::monday())
            .start_time(start)
            .build_new()
            .unwrap()
    }
}

/// In-memory source of truth with switchable failures
#[derive(Default)]
pub struct FakePort {
    pub rows: RefCell<Vec<Booking>>,
    pub fail_updates: Cell<bool>,
    pub fail_fetch: Cell<bool>,
    pub calls: RefCell<Vec<String>>,
    next_id: Cell<u32>,
}

impl FakePort {
    pub fn with_rows(rows: Vec<Booking>) -> Self {
        Self {
            rows: RefCell::new(rows),
            ..Default::default()
        }
    }

    pub fn row(&self, id: &str) -> Option<Booking> {
        self.rows
            .borrow()
            .iter()
            .find(|b| b.id.as_str() == id)
            .cloned()
    }
}

#[async_trait(?Send)]
impl BookingPort for FakePort {
    async fn fetch_all(&self) -> Result<Vec<Booking>, PortError> {
        self.calls.borrow_mut().push("fetch_all".to_string());
        if self.fail_fetch.get() {
            return Err(PortError::Storage("source unavailable".to_string()));
        }
        Ok(self.rows.borrow().clone())
    }

    async fn update_booking(
        &self,
        id: &BookingId,
        patch: &BookingPatch,
    ) -> Result<Booking, PortError> {
        self.calls.borrow_mut().push(format!("update {}", id));
        if self.fail_updates.get() {
            return Err(PortError::Storage("write rejected".to_string()));
        }
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| PortError::NotFound(id.clone()))?;
        row.apply(patch);
        Ok(row.clone())
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, PortError> {
        self.calls.borrow_mut().push("create".to_string());
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        let created = booking
            .clone()
            .into_booking(BookingId::new(format!("new-{}", n)), Local::now());
        self.rows.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn delete_booking(&self, id: &BookingId) -> Result<(), PortError> {
        self.calls.borrow_mut().push(format!("delete {}", id));
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|b| &b.id != id);
        if rows.len() == before {
            return Err(PortError::NotFound(id.clone()));
        }
        Ok(())
    }
}
