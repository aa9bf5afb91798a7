//! Availability decision logic
//!
//! Pure functions over already-loaded calendar and booking rows; the
//! repositories re-run the same decision inside their transactional
//! guards so the answer cannot go stale between check and commit.

use chrono::NaiveDate;

use super::booking::Booking;
use super::calendar::CalendarOverride;
use super::homestay::Homestay;

/// Half-open interval overlap: `[a_in, a_out)` and `[b_in, b_out)`
/// conflict iff they share at least one occupied night. A checkout on
/// day N does not conflict with a check-in on day N.
pub fn ranges_overlap(
    a_in: NaiveDate,
    a_out: NaiveDate,
    b_in: NaiveDate,
    b_out: NaiveDate,
) -> bool {
    a_in < b_out && a_out > b_in
}

/// Decide whether `[check_in, check_out)` can be booked.
///
/// `existing` must contain the bookings for the same homestay whose
/// status still holds dates (Pending, Confirmed, CheckedIn);
/// `exclude_booking` lets a booking being edited or confirmed ignore
/// its own prior range.
pub fn is_range_available(
    homestay: &Homestay,
    existing: &[Booking],
    overrides: &[CalendarOverride],
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude_booking: Option<i64>,
) -> bool {
    if !homestay.is_bookable() {
        return false;
    }

    let overlapping = existing.iter().any(|b| {
        b.status.holds_dates()
            && exclude_booking != Some(b.id)
            && ranges_overlap(b.check_in, b.check_out, check_in, check_out)
    });
    if overlapping {
        return false;
    }

    let blocked = overrides.iter().any(|o| {
        o.is_effective() && o.is_blocked && o.date >= check_in && o.date < check_out
    });
    !blocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingStatus, GuestCounts};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn homestay() -> Homestay {
        Homestay {
            id: 1,
            owner_id: 10,
            name: "Test Stay".to_string(),
            is_active: true,
            is_approved: true,
            base_nightly_price: Decimal::from(100),
            weekend_price: None,
            weekly_discount: None,
            monthly_discount: None,
            minimum_nights: 1,
            maximum_nights: 30,
            maximum_guests: 4,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booking(id: i64, status: BookingStatus, check_in: &str, check_out: &str) -> Booking {
        Booking {
            id,
            code: format!("BK-TEST-{:05}", id),
            homestay_id: 1,
            guest_id: 20,
            check_in: date(check_in),
            check_out: date(check_out),
            counts: GuestCounts {
                guests: 2,
                adults: 2,
                children: 0,
                infants: 0,
            },
            base_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            cleaning_fee: Decimal::ZERO,
            service_fee: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            status,
            special_requests: None,
            cancellation_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn blocked(d: &str) -> CalendarOverride {
        CalendarOverride {
            id: 0,
            homestay_id: 1,
            date: date(d),
            custom_price: None,
            is_blocked: true,
            minimum_nights_override: None,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn open_range_is_available() {
        assert!(is_range_available(
            &homestay(),
            &[],
            &[],
            date("2025-06-01"),
            date("2025-06-05"),
            None,
        ));
    }

    #[test]
    fn overlapping_pending_booking_blocks() {
        let existing = [booking(1, BookingStatus::Pending, "2025-06-03", "2025-06-07")];
        assert!(!is_range_available(
            &homestay(),
            &existing,
            &[],
            date("2025-06-01"),
            date("2025-06-05"),
            None,
        ));
    }

    #[test]
    fn checkout_equal_to_checkin_is_not_a_conflict() {
        let existing = [booking(1, BookingStatus::Confirmed, "2025-06-01", "2025-06-05")];
        assert!(is_range_available(
            &homestay(),
            &existing,
            &[],
            date("2025-06-05"),
            date("2025-06-08"),
            None,
        ));
    }

    #[test]
    fn cancelled_booking_does_not_block() {
        let existing = [booking(1, BookingStatus::Cancelled, "2025-06-01", "2025-06-05")];
        assert!(is_range_available(
            &homestay(),
            &existing,
            &[],
            date("2025-06-02"),
            date("2025-06-04"),
            None,
        ));
    }

    #[test]
    fn excluded_booking_ignores_own_range() {
        let existing = [booking(7, BookingStatus::Confirmed, "2025-06-01", "2025-06-05")];
        assert!(is_range_available(
            &homestay(),
            &existing,
            &[],
            date("2025-06-02"),
            date("2025-06-06"),
            Some(7),
        ));
        assert!(!is_range_available(
            &homestay(),
            &existing,
            &[],
            date("2025-06-02"),
            date("2025-06-06"),
            Some(8),
        ));
    }

    #[test]
    fn blocked_override_blocks_range() {
        let overrides = [blocked("2025-06-03")];
        assert!(!is_range_available(
            &homestay(),
            &[],
            &overrides,
            date("2025-06-01"),
            date("2025-06-05"),
            None,
        ));
        // Checkout day itself is not occupied.
        assert!(is_range_available(
            &homestay(),
            &[],
            &overrides,
            date("2025-06-01"),
            date("2025-06-03"),
            None,
        ));
    }

    #[test]
    fn deleted_blocked_override_is_ignored() {
        let mut entry = blocked("2025-06-03");
        entry.is_deleted = true;
        assert!(is_range_available(
            &homestay(),
            &[],
            &[entry],
            date("2025-06-01"),
            date("2025-06-05"),
            None,
        ));
    }

    #[test]
    fn inactive_or_unapproved_homestay_is_unavailable() {
        let mut h = homestay();
        h.is_active = false;
        assert!(!is_range_available(
            &h,
            &[],
            &[],
            date("2025-06-01"),
            date("2025-06-05"),
            None,
        ));

        let mut h = homestay();
        h.is_approved = false;
        assert!(!is_range_available(
            &h,
            &[],
            &[],
            date("2025-06-01"),
            date("2025-06-05"),
            None,
        ));
    }
}
