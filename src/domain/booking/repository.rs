//! Booking repository interface

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::model::{Booking, BookingStatus};
use crate::domain::DomainResult;

/// Persistence boundary for bookings.
///
/// The guarded operations close the check-then-act race: they re-run
/// the availability decision against current rows and write inside
/// one transaction, so two concurrent requests for overlapping ranges
/// can never both commit. Callers map the resulting `Conflict` error
/// straight to the API.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>>;

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Booking>>;

    /// Bookings for a homestay that still hold dates (Pending,
    /// Confirmed, CheckedIn) and overlap `[check_in, check_out)`.
    async fn find_overlapping_active(
        &self,
        homestay_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>>;

    /// Insert a new booking, re-validating availability atomically.
    /// Fails with `Conflict` if the range was lost since the caller's
    /// pre-check. Returns the booking with its assigned ID.
    async fn insert_guarded(&self, booking: Booking) -> DomainResult<Booking>;

    /// Persist a booking whose date range must (still) be available,
    /// excluding its own prior range: Pending -> Confirmed and date
    /// edits. Fails with `Conflict` when availability was lost or the
    /// stored status no longer matches `expected_status`.
    async fn update_guarded(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> DomainResult<Booking>;

    /// Persist a mutation that does not affect the date range
    /// (status transitions, cancellation metadata, guest counts).
    /// The write lands only if the stored status still equals
    /// `expected_status`; a concurrent transition surfaces as
    /// `Conflict` instead of being silently overwritten.
    async fn update(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> DomainResult<Booking>;

    /// Pending bookings created at or before `cutoff`.
    async fn find_expired_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>>;
}
