//! Homestay domain module

pub mod model;
pub mod repository;

pub use model::Homestay;
pub use repository::HomestayRepository;
