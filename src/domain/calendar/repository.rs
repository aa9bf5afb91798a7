//! Availability calendar repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::CalendarOverride;
use crate::domain::DomainResult;

/// Read/write access to per-date calendar overrides.
#[async_trait]
pub trait AvailabilityCalendarRepository: Send + Sync {
    /// Active (non-deleted) overrides with `from <= date < to`.
    async fn find_in_range(
        &self,
        homestay_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<CalendarOverride>>;

    /// Insert or replace the override for (homestay, date).
    async fn upsert(&self, entry: CalendarOverride) -> DomainResult<CalendarOverride>;

    /// Soft-delete the override for (homestay, date).
    async fn delete(&self, homestay_id: i64, date: NaiveDate) -> DomainResult<()>;
}
