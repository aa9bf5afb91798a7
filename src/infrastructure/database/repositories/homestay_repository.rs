//! SeaORM implementation of HomestayRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::homestay::{Homestay, HomestayRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::homestay;

pub struct SeaOrmHomestayRepository {
    db: DatabaseConnection,
}

impl SeaOrmHomestayRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn model_to_domain(m: homestay::Model) -> Homestay {
    Homestay {
        id: m.id,
        owner_id: m.owner_id,
        name: m.name,
        is_active: m.is_active,
        is_approved: m.is_approved,
        base_nightly_price: m.base_nightly_price,
        weekend_price: m.weekend_price,
        weekly_discount: m.weekly_discount,
        monthly_discount: m.monthly_discount,
        minimum_nights: m.minimum_nights,
        maximum_nights: m.maximum_nights,
        maximum_guests: m.maximum_guests,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl HomestayRepository for SeaOrmHomestayRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Homestay>> {
        let model = homestay::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }
}
