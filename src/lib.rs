//! Client-side booking workflow for the LocalBook platform: opening-hours
//! evaluation, candidate-slot generation, availability classification,
//! the booking-session state machine, and the REST backend behind a trait
//! seam. The server keeps the authoritative scheduling decisions; this
//! crate owns the local eligibility checks the screens share.

pub mod backend;
pub mod configuration;
pub mod configuration_handler;
pub mod error;
pub mod opening_hours;
pub mod rest_backend;
pub mod session;
pub mod slots;
pub mod types;

#[cfg(test)]
mod testutils;

pub use backend::{BookingBackend, NewAppointment};
pub use configuration::Configuration;
pub use configuration_handler::ConfigurationHandler;
pub use error::BookingError;
pub use opening_hours::{describe_status, is_open_at, to_12_hour, to_24_hour, OpenStatus};
pub use rest_backend::RestBackend;
pub use session::{BookingSession, FetchTicket};
pub use slots::{classify_slots, generate_day_slots, slot_date_time, SlotAvailability, SlotStatus};
pub use types::{
    Appointment, AppointmentStatus, Business, DayHours, OpeningHours, Service,
};
