//! Core business entities, pure decision logic and persistence traits

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod homestay;
pub mod pricing;
pub mod user;

pub use booking::{Actor, Booking, BookingRepository, BookingStatus, TransitionContext};
pub use calendar::{AvailabilityCalendarRepository, CalendarOverride};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use homestay::{Homestay, HomestayRepository};
pub use pricing::{FeeRates, NightlyPrice, PriceBreakdown};
pub use user::{User, UserDirectory, UserRole};
