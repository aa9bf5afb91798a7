//! Homestay domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

/// A bookable homestay with its pricing configuration.
///
/// Pricing fields are read-only to the booking engine; property CRUD
/// is handled elsewhere.
#[derive(Debug, Clone)]
pub struct Homestay {
    pub id: i64,
    /// Host (owner) user ID
    pub owner_id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_approved: bool,
    /// Default price per night
    pub base_nightly_price: Decimal,
    /// Price for Friday and Saturday nights, when configured
    pub weekend_price: Option<Decimal>,
    /// Percentage discount for stays of 7+ nights
    pub weekly_discount: Option<Decimal>,
    /// Percentage discount for stays of 30+ nights; beats the weekly one
    pub monthly_discount: Option<Decimal>,
    pub minimum_nights: i32,
    pub maximum_nights: i32,
    pub maximum_guests: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Homestay {
    /// Whether the homestay can accept bookings at all.
    pub fn is_bookable(&self) -> bool {
        self.is_active && self.is_approved
    }

    /// Validate the pricing configuration invariants.
    pub fn validate_config(&self) -> DomainResult<()> {
        if self.minimum_nights < 1 {
            return Err(DomainError::Validation(
                "minimum_nights must be at least 1".into(),
            ));
        }
        if self.maximum_nights < self.minimum_nights {
            return Err(DomainError::Validation(
                "maximum_nights must be >= minimum_nights".into(),
            ));
        }
        if self.maximum_guests < 1 {
            return Err(DomainError::Validation(
                "maximum_guests must be at least 1".into(),
            ));
        }
        if self.base_nightly_price <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "base_nightly_price must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Homestay {
        Homestay {
            id: 1,
            owner_id: 10,
            name: "Riverside Cabin".to_string(),
            is_active: true,
            is_approved: true,
            base_nightly_price: Decimal::from(500_000),
            weekend_price: None,
            weekly_discount: None,
            monthly_discount: None,
            minimum_nights: 1,
            maximum_nights: 30,
            maximum_guests: 4,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(sample().validate_config().is_ok());
    }

    #[test]
    fn max_below_min_rejected() {
        let mut h = sample();
        h.minimum_nights = 5;
        h.maximum_nights = 3;
        assert!(matches!(
            h.validate_config(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn unapproved_homestay_is_not_bookable() {
        let mut h = sample();
        h.is_approved = false;
        assert!(!h.is_bookable());
    }
}
