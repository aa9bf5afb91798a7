//! Calendar override entity
//!
//! Per-date price and availability adjustments for a homestay.
//! Rows are soft-deleted so host edit history survives.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "calendar_overrides")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub homestay_id: i64,
    pub date: Date,

    #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
    pub custom_price: Option<Decimal>,

    pub is_blocked: bool,
    pub minimum_nights_override: Option<i32>,
    pub is_deleted: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::homestay::Entity",
        from = "Column::HomestayId",
        to = "super::homestay::Column::Id"
    )]
    Homestay,
}

impl Related<super::homestay::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homestay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
