//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::pricing::PriceBreakdown;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Awaiting host confirmation (and payment)
    Pending,
    /// Accepted by the host
    Confirmed,
    /// Guest has arrived
    CheckedIn,
    /// Guest has left
    CheckedOut,
    /// Closed out after checkout
    Completed,
    /// Cancelled by guest, admin or the expiration sweep
    Cancelled,
    /// Declined by the host
    Rejected,
    /// Guest never arrived
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "CheckedIn",
            Self::CheckedOut => "CheckedOut",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Rejected => "Rejected",
            Self::NoShow => "NoShow",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Confirmed" => Self::Confirmed,
            "CheckedIn" => Self::CheckedIn,
            "CheckedOut" => Self::CheckedOut,
            "Completed" => Self::Completed,
            "Rejected" => Self::Rejected,
            "NoShow" => Self::NoShow,
            _ => Self::Cancelled,
        }
    }

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Cancelled | Self::Rejected | Self::NoShow
        )
    }

    /// Statuses that occupy the calendar for overlap purposes.
    pub fn holds_dates(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::CheckedIn)
    }

    /// Field edits (dates, guest counts, requests) are only allowed here.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guest headcount for a booking.
///
/// Invariants: `adults >= 1`, `guests == adults + children`; infants
/// do not count toward capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestCounts {
    pub guests: i32,
    pub adults: i32,
    pub children: i32,
    pub infants: i32,
}

/// A reservation of a homestay for a half-open date range
/// `[check_in, check_out)`; the checkout date itself is not occupied.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i64,
    /// Human-facing code, e.g. `BK-20250107-A1B2C`
    pub code: String,
    pub homestay_id: i64,
    pub guest_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub counts: GuestCounts,
    /// Price fields as of creation/last recompute
    pub base_amount: Decimal,
    pub discount_amount: Decimal,
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    /// "System" for expiration, otherwise the acting user's ID
    pub cancelled_by: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whole calendar nights between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Copy a computed price breakdown into the persisted fields.
    pub fn apply_price(&mut self, price: &PriceBreakdown) {
        self.base_amount = price.base_amount;
        self.discount_amount = price.discount_amount;
        self.cleaning_fee = price.cleaning_fee;
        self.service_fee = price.service_fee;
        self.tax_amount = price.tax_amount;
        self.total_amount = price.total_amount;
    }
}

/// Generate a booking code in the form `BK-YYYYMMDD-XXXXX`.
pub fn generate_booking_code(now: DateTime<Utc>) -> String {
    let date_part = now.format("%Y%m%d");
    let hex = Uuid::new_v4().simple().to_string();
    format!("BK-{}-{}", date_part, hex[..5].to_uppercase())
}
