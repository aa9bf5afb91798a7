//! SeaORM implementation of AvailabilityCalendarRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::calendar::{AvailabilityCalendarRepository, CalendarOverride};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::calendar_override;

pub struct SeaOrmCalendarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCalendarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn model_to_domain(m: calendar_override::Model) -> CalendarOverride {
    CalendarOverride {
        id: m.id,
        homestay_id: m.homestay_id,
        date: m.date,
        custom_price: m.custom_price,
        is_blocked: m.is_blocked,
        minimum_nights_override: m.minimum_nights_override,
        is_deleted: m.is_deleted,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl AvailabilityCalendarRepository for SeaOrmCalendarRepository {
    async fn find_in_range(
        &self,
        homestay_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<CalendarOverride>> {
        let models = calendar_override::Entity::find()
            .filter(calendar_override::Column::HomestayId.eq(homestay_id))
            .filter(calendar_override::Column::IsDeleted.eq(false))
            .filter(calendar_override::Column::Date.gte(from))
            .filter(calendar_override::Column::Date.lt(to))
            .order_by_asc(calendar_override::Column::Date)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn upsert(&self, entry: CalendarOverride) -> DomainResult<CalendarOverride> {
        debug!(
            "upserting calendar override: homestay {} date {}",
            entry.homestay_id, entry.date
        );

        // The unique (homestay, date) index includes soft-deleted
        // rows, so an upsert revives a deleted row in place.
        let existing = calendar_override::Entity::find()
            .filter(calendar_override::Column::HomestayId.eq(entry.homestay_id))
            .filter(calendar_override::Column::Date.eq(entry.date))
            .one(&self.db)
            .await?;

        let saved = match existing {
            Some(row) => {
                let mut active: calendar_override::ActiveModel = row.into();
                active.custom_price = Set(entry.custom_price);
                active.is_blocked = Set(entry.is_blocked);
                active.minimum_nights_override = Set(entry.minimum_nights_override);
                active.is_deleted = Set(false);
                active.updated_at = Set(entry.updated_at);
                active.update(&self.db).await?
            }
            None => {
                let active = calendar_override::ActiveModel {
                    id: sea_orm::ActiveValue::NotSet,
                    homestay_id: Set(entry.homestay_id),
                    date: Set(entry.date),
                    custom_price: Set(entry.custom_price),
                    is_blocked: Set(entry.is_blocked),
                    minimum_nights_override: Set(entry.minimum_nights_override),
                    is_deleted: Set(false),
                    created_at: Set(entry.created_at),
                    updated_at: Set(entry.updated_at),
                };
                active.insert(&self.db).await?
            }
        };

        Ok(model_to_domain(saved))
    }

    async fn delete(&self, homestay_id: i64, date: NaiveDate) -> DomainResult<()> {
        let existing = calendar_override::Entity::find()
            .filter(calendar_override::Column::HomestayId.eq(homestay_id))
            .filter(calendar_override::Column::Date.eq(date))
            .filter(calendar_override::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?;

        if let Some(row) = existing {
            let updated_at = chrono::Utc::now();
            let mut active: calendar_override::ActiveModel = row.into();
            active.is_deleted = Set(true);
            active.updated_at = Set(updated_at);
            active.update(&self.db).await?;
        }
        Ok(())
    }
}
