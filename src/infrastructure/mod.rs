//! Infrastructure layer: persistence and storage backends

pub mod database;
pub mod memory;

pub use database::{init_database, DatabaseConfig};
pub use memory::InMemoryStore;
