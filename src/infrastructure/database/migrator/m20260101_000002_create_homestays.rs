//! Create homestays table
//!
//! Pricing configuration lives on the homestay row: base and weekend
//! nightly rates plus optional length-of-stay discount percentages.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Homestays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Homestays::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Homestays::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(Homestays::Name).string().not_null())
                    .col(
                        ColumnDef::new(Homestays::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Homestays::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Homestays::BaseNightlyPrice)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Homestays::WeekendPrice).decimal_len(16, 2))
                    .col(ColumnDef::new(Homestays::WeeklyDiscount).decimal_len(5, 2))
                    .col(ColumnDef::new(Homestays::MonthlyDiscount).decimal_len(5, 2))
                    .col(
                        ColumnDef::new(Homestays::MinimumNights)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Homestays::MaximumNights)
                            .integer()
                            .not_null()
                            .default(365),
                    )
                    .col(
                        ColumnDef::new(Homestays::MaximumGuests)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Homestays::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Homestays::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_homestays_owner")
                            .from(Homestays::Table, Homestays::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_homestays_owner")
                    .table(Homestays::Table)
                    .col(Homestays::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Homestays::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Homestays {
    Table,
    Id,
    OwnerId,
    Name,
    IsActive,
    IsApproved,
    BaseNightlyPrice,
    WeekendPrice,
    WeeklyDiscount,
    MonthlyDiscount,
    MinimumNights,
    MaximumNights,
    MaximumGuests,
    CreatedAt,
    UpdatedAt,
}
