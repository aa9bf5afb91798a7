//! Homestay entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "homestays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Host (owner) user ID
    pub owner_id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_approved: bool,

    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub base_nightly_price: Decimal,

    #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
    pub weekend_price: Option<Decimal>,

    /// Percent, e.g. 10.00 for 10%
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub weekly_discount: Option<Decimal>,

    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub monthly_discount: Option<Decimal>,

    pub minimum_nights: i32,
    pub maximum_nights: i32,
    pub maximum_guests: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::calendar_override::Entity")]
    CalendarOverrides,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::calendar_override::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalendarOverrides.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
