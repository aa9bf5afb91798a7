//! Availability calendar domain module

pub mod model;
pub mod repository;

pub use model::CalendarOverride;
pub use repository::AvailabilityCalendarRepository;
