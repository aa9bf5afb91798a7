//! Application services

pub mod booking;
pub mod expiration;

pub use booking::{ActorRef, BookingService, BookingUpdate, NewBooking};
pub use expiration::{ExpirationSweeper, SweepReport, SweeperConfig};
