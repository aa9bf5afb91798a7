//! SeaORM implementation of BookingRepository
//!
//! The guarded write paths re-run the availability decision and write
//! inside one transaction. On Postgres the transaction runs at
//! serializable isolation so two overlapping requests cannot both
//! commit; SQLite serializes writers on its own.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::availability;
use crate::domain::booking::{Booking, BookingRepository, BookingStatus, GuestCounts};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, calendar_override, homestay};

use super::{calendar_repository, homestay_repository};

const UNAVAILABLE_MSG: &str = "Homestay is not available for the selected dates.";

/// Statuses that occupy the calendar, as stored.
const HOLDING_STATUSES: [&str; 3] = ["Pending", "Confirmed", "CheckedIn"];

fn stale_status_msg(expected: BookingStatus) -> String {
    format!("Booking is no longer {}.", expected)
}

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin_guarded(&self) -> DomainResult<DatabaseTransaction> {
        let txn = match self.db.get_database_backend() {
            DbBackend::Postgres => {
                self.db
                    .begin_with_config(Some(IsolationLevel::Serializable), None)
                    .await?
            }
            _ => self.db.begin().await?,
        };
        Ok(txn)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        code: m.code,
        homestay_id: m.homestay_id,
        guest_id: m.guest_id,
        check_in: m.check_in,
        check_out: m.check_out,
        counts: GuestCounts {
            guests: m.guests,
            adults: m.adults,
            children: m.children,
            infants: m.infants,
        },
        base_amount: m.base_amount,
        discount_amount: m.discount_amount,
        cleaning_fee: m.cleaning_fee,
        service_fee: m.service_fee,
        tax_amount: m.tax_amount,
        total_amount: m.total_amount,
        status: BookingStatus::from_str(&m.status),
        special_requests: m.special_requests,
        cancellation_reason: m.cancellation_reason,
        cancelled_by: m.cancelled_by,
        cancelled_at: m.cancelled_at,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn to_active(b: &Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        code: Set(b.code.clone()),
        homestay_id: Set(b.homestay_id),
        guest_id: Set(b.guest_id),
        check_in: Set(b.check_in),
        check_out: Set(b.check_out),
        guests: Set(b.counts.guests),
        adults: Set(b.counts.adults),
        children: Set(b.counts.children),
        infants: Set(b.counts.infants),
        base_amount: Set(b.base_amount),
        discount_amount: Set(b.discount_amount),
        cleaning_fee: Set(b.cleaning_fee),
        service_fee: Set(b.service_fee),
        tax_amount: Set(b.tax_amount),
        total_amount: Set(b.total_amount),
        status: Set(b.status.as_str().to_string()),
        special_requests: Set(b.special_requests.clone()),
        cancellation_reason: Set(b.cancellation_reason.clone()),
        cancelled_by: Set(b.cancelled_by.clone()),
        cancelled_at: Set(b.cancelled_at),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

/// Re-run the availability decision against current rows. Generic
/// over the connection so it can run inside the guarded transaction.
async fn range_available<C: ConnectionTrait>(
    conn: &C,
    homestay_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude_booking: Option<i64>,
) -> DomainResult<bool> {
    let Some(stay) = homestay::Entity::find_by_id(homestay_id).one(conn).await? else {
        return Ok(false);
    };
    let stay = homestay_repository::model_to_domain(stay);

    let existing: Vec<Booking> = booking::Entity::find()
        .filter(booking::Column::HomestayId.eq(homestay_id))
        .filter(booking::Column::Status.is_in(HOLDING_STATUSES))
        .filter(booking::Column::CheckIn.lt(check_out))
        .filter(booking::Column::CheckOut.gt(check_in))
        .all(conn)
        .await?
        .into_iter()
        .map(model_to_domain)
        .collect();

    let overrides = calendar_override::Entity::find()
        .filter(calendar_override::Column::HomestayId.eq(homestay_id))
        .filter(calendar_override::Column::IsDeleted.eq(false))
        .filter(calendar_override::Column::Date.gte(check_in))
        .filter(calendar_override::Column::Date.lt(check_out))
        .all(conn)
        .await?
        .into_iter()
        .map(calendar_repository::model_to_domain)
        .collect::<Vec<_>>();

    Ok(availability::is_range_available(
        &stay,
        &existing,
        &overrides,
        check_in,
        check_out,
        exclude_booking,
    ))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_overlapping_active(
        &self,
        homestay_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::HomestayId.eq(homestay_id))
            .filter(booking::Column::Status.is_in(HOLDING_STATUSES))
            .filter(booking::Column::CheckIn.lt(check_out))
            .filter(booking::Column::CheckOut.gt(check_in))
            .order_by_asc(booking::Column::CheckIn)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn insert_guarded(&self, b: Booking) -> DomainResult<Booking> {
        debug!("inserting booking {} (guarded)", b.code);

        let txn = self.begin_guarded().await?;

        if !range_available(&txn, b.homestay_id, b.check_in, b.check_out, None).await? {
            txn.rollback().await?;
            return Err(DomainError::Conflict(UNAVAILABLE_MSG.to_string()));
        }

        let mut active = to_active(&b);
        active.id = NotSet;
        let inserted = active.insert(&txn).await?;
        txn.commit().await?;

        Ok(model_to_domain(inserted))
    }

    async fn update_guarded(
        &self,
        b: Booking,
        expected_status: BookingStatus,
    ) -> DomainResult<Booking> {
        debug!("updating booking {} (guarded)", b.code);

        let txn = self.begin_guarded().await?;

        let Some(current) = booking::Entity::find_by_id(b.id).one(&txn).await? else {
            txn.rollback().await?;
            return Err(DomainError::not_found("Booking", "id", b.id));
        };
        if current.status != expected_status.as_str() {
            txn.rollback().await?;
            return Err(DomainError::Conflict(stale_status_msg(expected_status)));
        }

        if !range_available(&txn, b.homestay_id, b.check_in, b.check_out, Some(b.id)).await? {
            txn.rollback().await?;
            return Err(DomainError::Conflict(UNAVAILABLE_MSG.to_string()));
        }

        let updated = to_active(&b).update(&txn).await?;
        txn.commit().await?;

        Ok(model_to_domain(updated))
    }

    async fn update(&self, b: Booking, expected_status: BookingStatus) -> DomainResult<Booking> {
        let txn = self.begin_guarded().await?;

        let Some(current) = booking::Entity::find_by_id(b.id).one(&txn).await? else {
            txn.rollback().await?;
            return Err(DomainError::not_found("Booking", "id", b.id));
        };
        if current.status != expected_status.as_str() {
            txn.rollback().await?;
            return Err(DomainError::Conflict(stale_status_msg(expected_status)));
        }

        let updated = to_active(&b).update(&txn).await?;
        txn.commit().await?;

        Ok(model_to_domain(updated))
    }

    async fn find_expired_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(BookingStatus::Pending.as_str()))
            .filter(booking::Column::CreatedAt.lte(cutoff))
            .order_by_asc(booking::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
