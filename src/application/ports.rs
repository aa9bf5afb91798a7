//! Outbound ports
//!
//! Interfaces the engine calls out through. Both ports are
//! fire-and-forget: implementations must not fail a status
//! transition, so the methods return nothing and implementations
//! swallow and log their own errors.

use async_trait::async_trait;
use log::info;

use crate::domain::Booking;

/// Guest/host notifications (email, push). Best-effort only.
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn booking_confirmed(&self, booking: &Booking);
    async fn booking_rejected(&self, booking: &Booking);
    async fn booking_cancelled(&self, booking: &Booking);
    async fn booking_checked_in(&self, booking: &Booking);
}

/// Payment gateway hook. The engine informs it of cancellations and
/// rejections so refunds can be initiated; it never waits on payment
/// completion to finalize a transition.
#[async_trait]
pub trait PaymentPort: Send + Sync {
    async fn initiate_refund(&self, booking: &Booking);
}

/// Default notification sink: log lines only.
pub struct LogNotifier;

#[async_trait]
impl NotificationPort for LogNotifier {
    async fn booking_confirmed(&self, booking: &Booking) {
        info!("notify: booking {} confirmed", booking.code);
    }

    async fn booking_rejected(&self, booking: &Booking) {
        info!("notify: booking {} rejected", booking.code);
    }

    async fn booking_cancelled(&self, booking: &Booking) {
        info!("notify: booking {} cancelled", booking.code);
    }

    async fn booking_checked_in(&self, booking: &Booking) {
        info!("notify: booking {} checked in", booking.code);
    }
}

/// Default payment hook: log lines only.
pub struct LogPaymentGateway;

#[async_trait]
impl PaymentPort for LogPaymentGateway {
    async fn initiate_refund(&self, booking: &Booking) {
        info!(
            "payment: refund of {} initiated for booking {}",
            booking.total_amount, booking.code
        );
    }
}
