// Booking module
// Salon appointment model: who is booked, for which service, when and for how long

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::service_kind::ServiceKind;
use crate::utils::time::{parse_time, to_minutes};

/// Longest notes text accepted on a booking.
pub const MAX_NOTES_LEN: usize = 2000;

/// Opaque booking identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier for newly created bookings.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BookingId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Client {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: None,
            email: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting confirmation
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    /// Client didn't show up
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no_show",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            "no_show" => Some(BookingStatus::NoShow),
            _ => None,
        }
    }

    /// Whether a booking in this status takes up room on the day grid.
    pub fn occupies_grid(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

/// A scheduled service occupying a date, a start time and a duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub service_kind: ServiceKind,
    pub clients: Vec<Client>,
    pub date: NaiveDate,
    /// `"HH:mm"`
    pub start_time: String,
    pub duration_minutes: u32,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl Booking {
    /// Create a builder for constructing bookings
    pub fn builder() -> BookingBuilder {
        BookingBuilder::new()
    }

    pub fn start_minutes(&self) -> u32 {
        to_minutes(&self.start_time)
    }

    /// End in minutes since midnight. May exceed 1440 for bookings that run
    /// past midnight; that is not rejected. Saturates instead of wrapping.
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes().saturating_add(self.duration_minutes)
    }

    /// Name of the first client, which is what the block label shows.
    pub fn primary_client_name(&self) -> &str {
        self.clients.first().map(|c| c.name.as_str()).unwrap_or("")
    }

    /// Merge the fields set on `patch` into this booking. Does not touch timestamps.
    pub fn apply(&mut self, patch: &BookingPatch) {
        if let Some(kind) = patch.service_kind {
            self.service_kind = kind;
        }
        if let Some(ref clients) = patch.clients {
            self.clients = clients.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(ref start_time) = patch.start_time {
            self.start_time = start_time.clone();
        }
        if let Some(duration) = patch.duration_minutes {
            self.duration_minutes = duration;
        }
        if let Some(ref notes) = patch.notes {
            self.notes = notes.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Validate the booking
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err("Booking id cannot be empty".to_string());
        }
        validate_fields(
            &self.clients,
            &self.start_time,
            self.duration_minutes,
            self.notes.as_deref(),
        )
    }
}

fn validate_fields(
    clients: &[Client],
    start_time: &str,
    duration_minutes: u32,
    notes: Option<&str>,
) -> Result<(), String> {
    if clients.is_empty() {
        return Err("Booking must have at least one client".to_string());
    }
    if clients.iter().any(|c| c.name.trim().is_empty()) {
        return Err("Client name cannot be empty".to_string());
    }
    if parse_time(start_time).is_none() {
        return Err(format!("Start time must be HH:mm, got {:?}", start_time));
    }
    if duration_minutes == 0 {
        return Err("Booking duration must be positive".to_string());
    }
    if notes.map_or(false, |n| n.chars().count() > MAX_NOTES_LEN) {
        return Err(format!("Notes cannot exceed {} characters", MAX_NOTES_LEN));
    }
    Ok(())
}

/// Partial update. `None` leaves a field untouched; `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_kind: Option<ServiceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<Client>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

impl BookingPatch {
    /// Patch produced by dropping a booking on a new slot.
    pub fn reschedule(date: NaiveDate, start_time: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            start_time: Some(start_time.into()),
            ..Default::default()
        }
    }

    /// Patch produced by dragging a booking's resize handle.
    pub fn resize(duration_minutes: u32) -> Self {
        Self {
            duration_minutes: Some(duration_minutes),
            ..Default::default()
        }
    }

    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A booking that has not been persisted yet (no id, no timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub service_kind: ServiceKind,
    pub clients: Vec<Client>,
    pub date: NaiveDate,
    pub start_time: String,
    pub duration_minutes: u32,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
}

impl NewBooking {
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(
            &self.clients,
            &self.start_time,
            self.duration_minutes,
            self.notes.as_deref(),
        )
    }

    /// Turn into a stored booking with the given id, stamping both timestamps.
    pub fn into_booking(self, id: BookingId, now: DateTime<Local>) -> Booking {
        Booking {
            id,
            service_kind: self.service_kind,
            clients: self.clients,
            date: self.date,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Builder for creating bookings with optional fields
#[derive(Default)]
pub struct BookingBuilder {
    id: Option<BookingId>,
    service_kind: Option<ServiceKind>,
    clients: Vec<Client>,
    date: Option<NaiveDate>,
    start_time: Option<String>,
    duration_minutes: Option<u32>,
    notes: Option<String>,
    status: BookingStatus,
}

impl BookingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<BookingId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn service(mut self, kind: ServiceKind) -> Self {
        self.service_kind = Some(kind);
        self
    }

    /// Append a client; call repeatedly for group bookings.
    pub fn client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Set the duration. Defaults to the service kind's default duration.
    pub fn duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Build an unsaved booking, ready to hand to the persistence port.
    pub fn build_new(self) -> Result<NewBooking, String> {
        let service_kind = self.service_kind.ok_or("Service kind is required")?;
        let date = self.date.ok_or("Booking date is required")?;
        let start_time = self.start_time.ok_or("Start time is required")?;
        let duration_minutes = self
            .duration_minutes
            .unwrap_or_else(|| service_kind.default_duration_minutes());

        let booking = NewBooking {
            service_kind,
            clients: self.clients,
            date,
            start_time,
            duration_minutes,
            notes: self.notes,
            status: self.status,
        };
        booking.validate()?;
        Ok(booking)
    }

    /// Build a booking with an id, stamped with the current time.
    pub fn build(mut self) -> Result<Booking, String> {
        let id = self.id.take().ok_or("Booking id is required")?;
        let booking = self.build_new()?.into_booking(id, Local::now());
        booking.validate()?;
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_14() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn sample() -> Booking {
        Booking::builder()
            .id("b-1")
            .service(ServiceKind::Haircut)
            .client(Client::new("c-1", "Ana"))
            .date(march_14())
            .start_time("10:30")
            .duration(45)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_success() {
        let booking = sample();
        assert_eq!(booking.id.as_str(), "b-1");
        assert_eq!(booking.start_minutes(), 630);
        assert_eq!(booking.end_minutes(), 675);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.created_at, booking.updated_at);
    }

    #[test]
    fn test_builder_defaults_duration_from_service() {
        let booking = Booking::builder()
            .id("b-2")
            .service(ServiceKind::Coloring)
            .client(Client::new("c-1", "Ana"))
            .date(march_14())
            .start_time("09:00")
            .build()
            .unwrap();
        assert_eq!(booking.duration_minutes, 120);
    }

    #[test]
    fn test_builder_requires_client() {
        let result = Booking::builder()
            .id("b-3")
            .service(ServiceKind::Facial)
            .date(march_14())
            .start_time("09:00")
            .build();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("client"));
    }

    #[test]
    fn test_builder_rejects_zero_duration() {
        let result = Booking::builder()
            .id("b-4")
            .service(ServiceKind::Facial)
            .client(Client::new("c-1", "Ana"))
            .date(march_14())
            .start_time("09:00")
            .duration(0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_bad_start_time() {
        let result = Booking::builder()
            .id("b-5")
            .service(ServiceKind::Facial)
            .client(Client::new("c-1", "Ana"))
            .date(march_14())
            .start_time("9h30")
            .build_new();
        assert!(result.is_err());
    }

    #[test]
    fn test_end_may_run_past_midnight() {
        let mut booking = sample();
        booking.start_time = "23:30".to_string();
        booking.duration_minutes = 90;
        assert!(booking.validate().is_ok());
        assert_eq!(booking.end_minutes(), 1500);
    }

    #[test]
    fn test_end_saturates_for_huge_duration() {
        let mut booking = sample();
        booking.duration_minutes = u32::MAX;
        assert!(booking.validate().is_ok());
        assert_eq!(booking.end_minutes(), u32::MAX);
    }

    #[test]
    fn test_apply_patch_only_touches_set_fields() {
        let mut booking = sample();
        let new_date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        booking.apply(&BookingPatch::reschedule(new_date, "11:15"));

        assert_eq!(booking.date, new_date);
        assert_eq!(booking.start_time, "11:15");
        assert_eq!(booking.duration_minutes, 45);
        assert_eq!(booking.service_kind, ServiceKind::Haircut);
    }

    #[test]
    fn test_apply_patch_can_clear_notes() {
        let mut booking = sample();
        booking.notes = Some("Allergic to latex".to_string());
        booking.apply(&BookingPatch {
            notes: Some(None),
            ..Default::default()
        });
        assert_eq!(booking.notes, None);
    }

    #[test]
    fn test_cancelled_bookings_do_not_occupy_grid() {
        assert!(BookingStatus::Confirmed.occupies_grid());
        assert!(!BookingStatus::Cancelled.occupies_grid());
    }

    #[test]
    fn test_booking_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["startTime"], "10:30");
        assert_eq!(json["durationMinutes"], 45);
        assert_eq!(json["serviceKind"], "haircut");
        assert_eq!(json["id"], "b-1");
    }
}
