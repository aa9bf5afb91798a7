//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Human-facing code, e.g. BK-20260115-A3F9C
    #[sea_orm(unique)]
    pub code: String,

    pub homestay_id: i64,
    pub guest_id: i64,

    pub check_in: Date,
    pub check_out: Date,

    pub guests: i32,
    pub adults: i32,
    pub children: i32,
    pub infants: i32,

    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub base_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub discount_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub cleaning_fee: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub service_fee: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub tax_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub total_amount: Decimal,

    /// "Pending" | "Confirmed" | "Rejected" | "Cancelled" |
    /// "CheckedIn" | "CheckedOut" | "Completed" | "NoShow"
    pub status: String,

    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<String>,
    pub cancelled_at: Option<DateTimeUtc>,

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
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::GuestId",
        to = "super::user::Column::Id"
    )]
    Guest,
}

impl Related<super::homestay::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homestay.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
