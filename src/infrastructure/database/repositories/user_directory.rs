//! SeaORM implementation of UserDirectory

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::user::{User, UserDirectory, UserRole};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserDirectory {
    db: DatabaseConnection,
}

impl SeaOrmUserDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        full_name: m.full_name,
        role: UserRole::from_str(&m.role),
        created_at: m.created_at,
    }
}

#[async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }
}
