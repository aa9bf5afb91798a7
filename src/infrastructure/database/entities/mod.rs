//! SeaORM entity definitions

pub mod booking;
pub mod calendar_override;
pub mod homestay;
pub mod user;
