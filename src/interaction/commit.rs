//! Optimistic mutation pipeline shared by drag, resize and the creation flow.
//!
//! A mutation is applied to the store first so the view updates at once, then
//! sent to the persistence port. If the port rejects it, the whole booking set
//! is reloaded from the port; there is no field-level rollback and no retry.

use std::rc::Rc;

use crate::models::booking::{Booking, BookingId, BookingPatch, NewBooking};
use crate::services::booking_store::SharedStore;
use crate::services::persistence::{BookingPort, PortError};

/// How a commit ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The port accepted the change
    Confirmed(Booking),
    /// The port rejected the change and the store was reloaded
    Reconciled(PortError),
    /// The port rejected the change and the reload failed too; the store
    /// still holds the optimistic state
    ReconcileFailed {
        error: PortError,
        reload_error: PortError,
    },
}

impl CommitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, CommitOutcome::Confirmed(_))
    }
}

/// An optimistic change already visible in the store, waiting to be persisted.
#[must_use = "the change is only local until `persist` is awaited"]
pub struct PendingCommit {
    store: SharedStore,
    port: Rc<dyn BookingPort>,
    booking_id: BookingId,
    patch: BookingPatch,
}

impl PendingCommit {
    /// Apply `patch` to the store. Returns `None` when the booking is not in
    /// the store, in which case nothing is sent to the port.
    pub fn apply(
        store: &SharedStore,
        port: &Rc<dyn BookingPort>,
        booking_id: BookingId,
        patch: BookingPatch,
    ) -> Option<Self> {
        if !store.borrow_mut().update(&booking_id, &patch) {
            return None;
        }
        Some(Self {
            store: Rc::clone(store),
            port: Rc::clone(port),
            booking_id,
            patch,
        })
    }

    pub fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    pub fn patch(&self) -> &BookingPatch {
        &self.patch
    }

    /// Send the change to the port, reloading the store if it is rejected.
    pub async fn persist(self) -> CommitOutcome {
        match self.port.update_booking(&self.booking_id, &self.patch).await {
            Ok(booking) => {
                log::info!("Persisted change to booking {}", self.booking_id);
                CommitOutcome::Confirmed(booking)
            }
            Err(error) => {
                log::error!("Failed to persist booking {}: {}", self.booking_id, error);
                log::warn!("Reloading bookings from source after failed update");
                match reload_from_source(&self.store, self.port.as_ref()).await {
                    Ok(_) => CommitOutcome::Reconciled(error),
                    Err(reload_error) => {
                        log::error!("Reload after failed update also failed: {}", reload_error);
                        CommitOutcome::ReconcileFailed {
                            error,
                            reload_error,
                        }
                    }
                }
            }
        }
    }
}

/// Replace the store's contents with the port's. Returns the number of bookings loaded.
pub async fn reload_from_source(
    store: &SharedStore,
    port: &dyn BookingPort,
) -> Result<usize, PortError> {
    let bookings = port.fetch_all().await?;
    let count = bookings.len();
    store.borrow_mut().set_all(bookings);
    log::debug!("Reloaded {} bookings", count);
    Ok(count)
}

/// Creation flow: persist first, then mirror the stored booking into the store.
pub async fn create_booking(
    store: &SharedStore,
    port: &dyn BookingPort,
    booking: NewBooking,
) -> Result<Booking, PortError> {
    booking.validate().map_err(PortError::Invalid)?;
    let created = port.create_booking(&booking).await.map_err(|e| {
        log::error!("Failed to create booking: {}", e);
        e
    })?;
    store.borrow_mut().add(created.clone());
    Ok(created)
}

/// Delete through the port; the store only changes once the port confirms.
pub async fn delete_booking(
    store: &SharedStore,
    port: &dyn BookingPort,
    id: &BookingId,
) -> Result<(), PortError> {
    port.delete_booking(id).await.map_err(|e| {
        log::error!("Failed to delete booking {}: {}", id, e);
        e
    })?;
    store.borrow_mut().remove(id);
    Ok(())
}
