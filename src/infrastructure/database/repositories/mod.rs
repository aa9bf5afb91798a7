//! SeaORM-backed repository implementations

pub mod booking_repository;
pub mod calendar_repository;
pub mod homestay_repository;
pub mod user_directory;

pub use booking_repository::SeaOrmBookingRepository;
pub use calendar_repository::SeaOrmCalendarRepository;
pub use homestay_repository::SeaOrmHomestayRepository;
pub use user_directory::SeaOrmUserDirectory;
