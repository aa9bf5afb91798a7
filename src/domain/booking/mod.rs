//! Booking domain module

pub mod lifecycle;
pub mod model;
pub mod repository;

pub use lifecycle::{Actor, TransitionContext, EXPIRATION_REASON, SYSTEM_ACTOR};
pub use model::{generate_booking_code, Booking, BookingStatus, GuestCounts};
pub use repository::BookingRepository;
