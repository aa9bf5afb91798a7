//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_users;
mod m20260101_000002_create_homestays;
mod m20260101_000003_create_calendar_overrides;
mod m20260101_000004_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_users::Migration),
            Box::new(m20260101_000002_create_homestays::Migration),
            Box::new(m20260101_000003_create_calendar_overrides::Migration),
            Box::new(m20260101_000004_create_bookings::Migration),
        ]
    }
}
