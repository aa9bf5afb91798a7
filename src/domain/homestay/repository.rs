//! Homestay repository interface

use async_trait::async_trait;

use super::model::Homestay;
use crate::domain::DomainResult;

/// Read access to the homestay catalog (the `ResourceCatalog` boundary).
#[async_trait]
pub trait HomestayRepository: Send + Sync {
    /// Find homestay by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Homestay>>;
}
