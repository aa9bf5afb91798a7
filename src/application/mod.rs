//! Business logic and use-case orchestration

pub mod ports;
pub mod services;

pub use ports::{LogNotifier, LogPaymentGateway, NotificationPort, PaymentPort};
pub use services::{
    ActorRef, BookingService, BookingUpdate, ExpirationSweeper, NewBooking, SweepReport,
    SweeperConfig,
};
