//! Per-date calendar override entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// A per-date exception to a homestay's default pricing/availability.
///
/// At most one active (non-deleted) override exists per
/// (homestay, date); the storage layer enforces that with a unique
/// index.
#[derive(Debug, Clone)]
pub struct CalendarOverride {
    pub id: i64,
    pub homestay_id: i64,
    pub date: NaiveDate,
    /// Overrides base/weekend price for this night
    pub custom_price: Option<Decimal>,
    /// Blocks the night entirely
    pub is_blocked: bool,
    /// Overrides the homestay minimum-stay for check-ins on this date
    pub minimum_nights_override: Option<i32>,
    /// Soft-delete flag
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalendarOverride {
    /// Whether this override participates in pricing/availability.
    pub fn is_effective(&self) -> bool {
        !self.is_deleted
    }
}
