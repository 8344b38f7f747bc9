//! In-memory booking collection shared by the day view and its controllers.
//!
//! Mutations notify subscribers synchronously. Subscribers must not borrow the
//! store from inside the callback; they receive the change and re-read later.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Local, NaiveDate};

use crate::models::booking::{Booking, BookingId, BookingPatch};
use crate::services::layout::{conflicts_with, DayLayout, PositionMapper};

/// The store as shared between the view, the controllers and in-flight commits.
pub type SharedStore = Rc<RefCell<BookingStore>>;

/// What changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added(BookingId),
    Updated(BookingId),
    Removed(BookingId),
    /// The whole collection was replaced
    Reloaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreChange)>;

#[derive(Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            ..Self::default()
        }
    }

    pub fn shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&StoreChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, change: StoreChange) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&change);
        }
    }

    pub fn all(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn get(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| &b.id == id)
    }

    /// Bookings on `date`, in insertion order.
    pub fn get_by_date(&self, date: NaiveDate) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.date == date)
            .cloned()
            .collect()
    }

    /// Merge `patch` into the booking and stamp `updated_at`.
    /// Returns false when no booking has that id.
    pub fn update(&mut self, id: &BookingId, patch: &BookingPatch) -> bool {
        let Some(booking) = self.bookings.iter_mut().find(|b| &b.id == id) else {
            log::warn!("Ignoring update for unknown booking {}", id);
            return false;
        };
        booking.apply(patch);
        booking.updated_at = Local::now();
        self.notify(StoreChange::Updated(id.clone()));
        true
    }

    /// Replace the whole collection.
    pub fn set_all(&mut self, bookings: Vec<Booking>) {
        self.bookings = bookings;
        self.notify(StoreChange::Reloaded);
    }

    /// Insert a booking, replacing any existing entry with the same id.
    pub fn add(&mut self, booking: Booking) {
        let id = booking.id.clone();
        match self.bookings.iter_mut().find(|b| b.id == id) {
            Some(existing) => {
                *existing = booking;
                self.notify(StoreChange::Updated(id));
            }
            None => {
                self.bookings.push(booking);
                self.notify(StoreChange::Added(id));
            }
        }
    }

    pub fn remove(&mut self, id: &BookingId) -> Option<Booking> {
        let index = self.bookings.iter().position(|b| &b.id == id)?;
        let removed = self.bookings.remove(index);
        self.notify(StoreChange::Removed(id.clone()));
        Some(removed)
    }

    /// Other bookings on the same date that overlap `booking`.
    pub fn conflicts_with(&self, booking: &Booking) -> Vec<&Booking> {
        conflicts_with(booking, &self.bookings)
    }

    /// Derived layout for `date`; computed on every call, never cached.
    pub fn layout_for(&self, date: NaiveDate, mapper: &PositionMapper) -> DayLayout {
        DayLayout::compute(date, &self.bookings, mapper)
    }
}

impl std::fmt::Debug for BookingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingStore")
            .field("bookings", &self.bookings.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
