//! SQLite-backed booking repository.

use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use rusqlite::{params, OptionalExtension, Row};

use super::{BookingPort, PortError};
use crate::models::booking::{Booking, BookingId, BookingPatch, BookingStatus, Client, NewBooking};
use crate::models::service_kind::ServiceKind;
use crate::services::database::Database;
use crate::utils::date::{format_iso_date, parse_iso_date};

const SELECT_COLUMNS: &str = "SELECT id, service_kind, clients, booking_date, start_time,
        duration_minutes, notes, status, created_at, updated_at
     FROM bookings";

pub struct SqliteBookingRepository {
    db: Rc<Database>,
}

impl SqliteBookingRepository {
    pub fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new booking under a fresh id.
    pub fn create(&self, booking: NewBooking) -> Result<Booking> {
        booking.validate().map_err(|e| anyhow!(e))?;
        let booking = booking.into_booking(BookingId::generate(), Local::now());
        self.insert(&booking)?;
        Ok(booking)
    }

    /// Insert a booking as-is, keeping its id and timestamps.
    pub fn insert(&self, booking: &Booking) -> Result<()> {
        booking.validate().map_err(|e| anyhow!(e))?;
        let clients =
            serde_json::to_string(&booking.clients).context("Failed to encode clients")?;

        self.db
            .connection()
            .execute(
                "INSERT INTO bookings (
                    id, service_kind, clients, booking_date, start_time,
                    duration_minutes, notes, status, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    booking.id.as_str(),
                    booking.service_kind.as_str(),
                    clients,
                    format_iso_date(booking.date),
                    booking.start_time,
                    booking.duration_minutes,
                    booking.notes,
                    booking.status.as_str(),
                    booking.created_at.to_rfc3339(),
                    booking.updated_at.to_rfc3339(),
                ],
            )
            .context("Failed to insert booking")?;
        Ok(())
    }

    /// Retrieve a booking by ID.
    pub fn get(&self, id: &BookingId) -> Result<Option<Booking>> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let row = self
            .db
            .connection()
            .query_row(&sql, [id.as_str()], read_row)
            .optional()
            .context("Failed to load booking")?;
        row.map(StoredRow::into_booking).transpose()
    }

    /// All bookings ordered by date then start time.
    pub fn list_all(&self) -> Result<Vec<Booking>> {
        let sql = format!("{} ORDER BY booking_date, start_time", SELECT_COLUMNS);
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&sql).context("Failed to prepare booking query")?;
        let rows = stmt
            .query_map([], read_row)
            .context("Failed to query bookings")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read booking rows")?;
        rows.into_iter().map(StoredRow::into_booking).collect()
    }

    /// Apply a patch. Returns `Ok(None)` if the booking does not exist.
    pub fn update(&self, id: &BookingId, patch: &BookingPatch) -> Result<Option<Booking>> {
        let Some(mut booking) = self.get(id)? else {
            return Ok(None);
        };
        booking.apply(patch);
        booking.validate().map_err(|e| anyhow!(e))?;
        booking.updated_at = Local::now();

        let clients =
            serde_json::to_string(&booking.clients).context("Failed to encode clients")?;
        self.db
            .connection()
            .execute(
                "UPDATE bookings
                 SET service_kind = ?, clients = ?, booking_date = ?, start_time = ?,
                     duration_minutes = ?, notes = ?, status = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    booking.service_kind.as_str(),
                    clients,
                    format_iso_date(booking.date),
                    booking.start_time,
                    booking.duration_minutes,
                    booking.notes,
                    booking.status.as_str(),
                    booking.updated_at.to_rfc3339(),
                    booking.id.as_str(),
                ],
            )
            .context("Failed to update booking")?;

        Ok(Some(booking))
    }

    /// Delete a booking. Returns false if nothing was deleted.
    pub fn delete(&self, id: &BookingId) -> Result<bool> {
        let affected = self
            .db
            .connection()
            .execute("DELETE FROM bookings WHERE id = ?", [id.as_str()])
            .context("Failed to delete booking")?;
        Ok(affected > 0)
    }
}

/// Raw column values; decoding happens outside the rusqlite row closure so
/// errors carry context.
struct StoredRow {
    id: String,
    service_kind: String,
    clients: String,
    date: String,
    start_time: String,
    duration_minutes: u32,
    notes: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<StoredRow> {
    Ok(StoredRow {
        id: row.get(0)?,
        service_kind: row.get(1)?,
        clients: row.get(2)?,
        date: row.get(3)?,
        start_time: row.get(4)?,
        duration_minutes: row.get(5)?,
        notes: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

impl StoredRow {
    fn into_booking(self) -> Result<Booking> {
        let service_kind: ServiceKind = self.service_kind.parse().map_err(|e: String| anyhow!(e))?;
        let clients: Vec<Client> = serde_json::from_str(&self.clients)
            .with_context(|| format!("Corrupt clients for booking {}", self.id))?;
        let date = parse_iso_date(&self.date)
            .ok_or_else(|| anyhow!("Corrupt date {:?} for booking {}", self.date, self.id))?;
        let status = BookingStatus::parse(&self.status)
            .ok_or_else(|| anyhow!("Unknown status {:?} for booking {}", self.status, self.id))?;

        Ok(Booking {
            id: BookingId::from(self.id),
            service_kind,
            clients,
            date,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
            status,
            created_at: to_local_datetime(&self.created_at)?,
            updated_at: to_local_datetime(&self.updated_at)?,
        })
    }
}

fn to_local_datetime(value: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Local))
        .with_context(|| format!("Invalid timestamp {:?}", value))
}

#[async_trait(?Send)]
impl BookingPort for SqliteBookingRepository {
    async fn fetch_all(&self) -> Result<Vec<Booking>, PortError> {
        Ok(self.list_all()?)
    }

    async fn update_booking(
        &self,
        id: &BookingId,
        patch: &BookingPatch,
    ) -> Result<Booking, PortError> {
        match self.update(id, patch) {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => Err(PortError::NotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, PortError> {
        booking.validate().map_err(PortError::Invalid)?;
        Ok(self.create(booking.clone())?)
    }

    async fn delete_booking(&self, id: &BookingId) -> Result<(), PortError> {
        if self.delete(id)? {
            Ok(())
        } else {
            Err(PortError::NotFound(id.clone()))
        }
    }
}
