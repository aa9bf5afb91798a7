//! Create calendar_overrides table
//!
//! One row per homestay per date. The unique index makes upsert the
//! only write path for a given date.

use sea_orm_migration::prelude::*;

use super::m20260101_000002_create_homestays::Homestays;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CalendarOverrides::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CalendarOverrides::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CalendarOverrides::HomestayId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CalendarOverrides::Date).date().not_null())
                    .col(ColumnDef::new(CalendarOverrides::CustomPrice).decimal_len(16, 2))
                    .col(
                        ColumnDef::new(CalendarOverrides::IsBlocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CalendarOverrides::MinimumNightsOverride).integer())
                    .col(
                        ColumnDef::new(CalendarOverrides::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CalendarOverrides::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CalendarOverrides::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_calendar_overrides_homestay")
                            .from(CalendarOverrides::Table, CalendarOverrides::HomestayId)
                            .to(Homestays::Table, Homestays::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_calendar_overrides_homestay_date")
                    .table(CalendarOverrides::Table)
                    .col(CalendarOverrides::HomestayId)
                    .col(CalendarOverrides::Date)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CalendarOverrides::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CalendarOverrides {
    Table,
    Id,
    HomestayId,
    Date,
    CustomPrice,
    IsBlocked,
    MinimumNightsOverride,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
