// Module exports for models

pub mod booking;
pub mod layout;
pub mod service_kind;
pub mod settings;
pub mod time_slot;
