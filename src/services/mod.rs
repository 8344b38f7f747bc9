// Service module exports

pub mod booking_store;
pub mod database;
pub mod key_value;
pub mod layout;
pub mod persistence;
pub mod settings;
