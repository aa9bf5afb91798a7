//! # Homestay Booking Engine
//!
//! Reservation engine for homestay rentals: price quotes, availability
//! checks, the booking lifecycle state machine, and expiration of
//! abandoned pending bookings.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, pricing/availability rules and
//!   repository traits
//! - **application**: Use-case orchestration (booking service,
//!   expiration sweeper) and outbound ports
//! - **infrastructure**: Persistence (SeaORM, in-memory store)
//! - **interfaces**: REST API

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStore};

// Re-export API router
pub use interfaces::http::create_api_router;
