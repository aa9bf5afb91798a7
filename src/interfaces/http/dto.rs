//! Booking API DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::pricing::{NightlyPrice, PriceBreakdown};
use crate::domain::CalendarOverride;

/// Request for a price quote
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    pub homestay_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, message = "at least one guest is required"))]
    pub guests: i32,
}

/// Query parameters for an availability check
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub homestay_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityDto {
    pub homestay_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub available: bool,
}

/// Acting user, passed as a query parameter until an auth layer
/// fronts this service.
#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    pub actor_id: i64,
}

/// Request to set a calendar override for one date
#[derive(Debug, Deserialize, Validate)]
pub struct CalendarOverrideRequest {
    pub actor_id: i64,
    pub custom_price: Option<Decimal>,
    #[serde(default)]
    pub is_blocked: bool,
    #[validate(range(min = 1))]
    pub minimum_nights_override: Option<i32>,
}

/// Calendar override in API responses
#[derive(Debug, Serialize)]
pub struct CalendarOverrideDto {
    pub id: i64,
    pub homestay_id: i64,
    pub date: NaiveDate,
    pub custom_price: Option<Decimal>,
    pub is_blocked: bool,
    pub minimum_nights_override: Option<i32>,
}

impl From<CalendarOverride> for CalendarOverrideDto {
    fn from(o: CalendarOverride) -> Self {
        Self {
            id: o.id,
            homestay_id: o.homestay_id,
            date: o.date,
            custom_price: o.custom_price,
            is_blocked: o.is_blocked,
            minimum_nights_override: o.minimum_nights_override,
        }
    }
}

/// Request to create a booking
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub actor_id: i64,
    pub homestay_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, message = "at least one guest is required"))]
    pub guests: i32,
    #[validate(range(min = 1, message = "at least one adult is required"))]
    pub adults: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub children: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub infants: i32,
    #[validate(length(max = 1000))]
    pub special_requests: Option<String>,
}

/// Partial edit of a booking; absent fields keep their value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    pub actor_id: i64,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub guests: Option<i32>,
    #[validate(range(min = 1))]
    pub adults: Option<i32>,
    #[validate(range(min = 0))]
    pub children: Option<i32>,
    #[validate(range(min = 0))]
    pub infants: Option<i32>,
    #[validate(length(max = 1000))]
    pub special_requests: Option<String>,
}

/// Request to move a booking to a new status
#[derive(Debug, Deserialize, Validate)]
pub struct TransitionRequest {
    pub actor_id: i64,
    /// Target status name, e.g. "Confirmed"
    #[validate(length(min = 1))]
    pub target: String,
    pub reason: Option<String>,
}

impl TransitionRequest {
    /// Strict status parse: unknown names are a client error, not a
    /// default.
    pub fn parse_target(&self) -> Option<BookingStatus> {
        match self.target.as_str() {
            "Pending" => Some(BookingStatus::Pending),
            "Confirmed" => Some(BookingStatus::Confirmed),
            "Rejected" => Some(BookingStatus::Rejected),
            "Cancelled" => Some(BookingStatus::Cancelled),
            "CheckedIn" => Some(BookingStatus::CheckedIn),
            "CheckedOut" => Some(BookingStatus::CheckedOut),
            "Completed" => Some(BookingStatus::Completed),
            "NoShow" => Some(BookingStatus::NoShow),
            _ => None,
        }
    }
}

/// One night in a price quote
#[derive(Debug, Serialize)]
pub struct NightlyPriceDto {
    pub date: NaiveDate,
    pub price: Decimal,
    pub is_weekend: bool,
    pub is_custom: bool,
}

/// Price quote in API responses
#[derive(Debug, Serialize)]
pub struct PriceBreakdownDto {
    pub nights: i64,
    pub nightly_prices: Vec<NightlyPriceDto>,
    pub base_amount: Decimal,
    pub discount_amount: Decimal,
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl From<PriceBreakdown> for PriceBreakdownDto {
    fn from(p: PriceBreakdown) -> Self {
        Self {
            nights: p.nights,
            nightly_prices: p
                .nightly_prices
                .into_iter()
                .map(|n: NightlyPrice| NightlyPriceDto {
                    date: n.date,
                    price: n.price,
                    is_weekend: n.is_weekend,
                    is_custom: n.is_custom,
                })
                .collect(),
            base_amount: p.base_amount,
            discount_amount: p.discount_amount,
            cleaning_fee: p.cleaning_fee,
            service_fee: p.service_fee,
            tax_amount: p.tax_amount,
            total_amount: p.total_amount,
        }
    }
}

/// Booking details in API responses
#[derive(Debug, Serialize)]
pub struct BookingDto {
    pub id: i64,
    pub code: String,
    pub homestay_id: i64,
    pub guest_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guests: i32,
    pub adults: i32,
    pub children: i32,
    pub infants: i32,
    pub base_amount: Decimal,
    pub discount_amount: Decimal,
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub status: String,
    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<String>,
    pub cancelled_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            nights: b.nights(),
            code: b.code,
            homestay_id: b.homestay_id,
            guest_id: b.guest_id,
            check_in: b.check_in,
            check_out: b.check_out,
            guests: b.counts.guests,
            adults: b.counts.adults,
            children: b.counts.children,
            infants: b.counts.infants,
            base_amount: b.base_amount,
            discount_amount: b.discount_amount,
            cleaning_fee: b.cleaning_fee,
            service_fee: b.service_fee,
            tax_amount: b.tax_amount,
            total_amount: b.total_amount,
            status: b.status.as_str().to_string(),
            special_requests: b.special_requests,
            cancellation_reason: b.cancellation_reason,
            cancelled_by: b.cancelled_by,
            cancelled_at: b.cancelled_at.map(|t| t.to_rfc3339()),
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}
