//! Nightly pricing calculator
//!
//! Pure computation: (homestay pricing config, calendar overrides,
//! date range, guest count) -> itemized price breakdown. No I/O.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};

use super::calendar::CalendarOverride;
use super::homestay::Homestay;
use super::{DomainError, DomainResult};

/// Stays of at least this many nights qualify for the weekly discount.
pub const WEEKLY_DISCOUNT_THRESHOLD: i64 = 7;
/// Stays of at least this many nights qualify for the monthly discount.
pub const MONTHLY_DISCOUNT_THRESHOLD: i64 = 30;

/// Deployment-wide fee rates, as fractions (0.05 = 5%).
///
/// Configurable per deployment, not per homestay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRates {
    pub cleaning: Decimal,
    pub service: Decimal,
    pub tax: Decimal,
}

impl Default for FeeRates {
    fn default() -> Self {
        Self {
            cleaning: Decimal::new(5, 2), // 5% of discounted base
            service: Decimal::new(10, 2), // 10% of discounted base
            tax: Decimal::new(8, 2),      // 8% VAT
        }
    }
}

/// Resolved price of a single night.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightlyPrice {
    pub date: NaiveDate,
    pub price: Decimal,
    pub is_weekend: bool,
    pub is_custom: bool,
}

/// Itemized price for a stay. Derived, never persisted as its own row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub nights: i64,
    pub nightly_prices: Vec<NightlyPrice>,
    /// Sum of per-night prices
    pub base_amount: Decimal,
    pub discount_amount: Decimal,
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn is_weekend_night(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

/// Compute the itemized price for a stay.
///
/// Per-night price priority: active calendar override with a custom
/// price, then the weekend price (Friday/Saturday nights), then the
/// base nightly price. The monthly discount takes strict precedence
/// over the weekly one; they are never combined. Rounding is applied
/// only at fee/tax computation, never on per-night prices.
pub fn compute(
    homestay: &Homestay,
    overrides: &[CalendarOverride],
    check_in: NaiveDate,
    check_out: NaiveDate,
    guest_count: i32,
    rates: &FeeRates,
) -> DomainResult<PriceBreakdown> {
    if check_out <= check_in {
        return Err(DomainError::Validation(
            "Check-out date must be after check-in date.".into(),
        ));
    }

    let nights = (check_out - check_in).num_days();
    if nights < homestay.minimum_nights as i64 {
        return Err(DomainError::Validation(format!(
            "Minimum stay is {} night(s).",
            homestay.minimum_nights
        )));
    }
    if nights > homestay.maximum_nights as i64 {
        return Err(DomainError::Validation(format!(
            "Maximum stay is {} night(s).",
            homestay.maximum_nights
        )));
    }
    if guest_count > homestay.maximum_guests {
        return Err(DomainError::Validation(format!(
            "Maximum number of guests is {}.",
            homestay.maximum_guests
        )));
    }

    let custom_prices: HashMap<NaiveDate, Decimal> = overrides
        .iter()
        .filter(|o| o.is_effective())
        .filter_map(|o| o.custom_price.map(|p| (o.date, p)))
        .collect();

    let mut nightly_prices = Vec::with_capacity(nights as usize);
    let mut base_amount = Decimal::ZERO;
    let mut date = check_in;
    while date < check_out {
        let (price, is_weekend, is_custom) = match custom_prices.get(&date) {
            Some(custom) => (*custom, false, true),
            None => {
                let weekend = is_weekend_night(date);
                let price = match (weekend, homestay.weekend_price) {
                    (true, Some(weekend_price)) => weekend_price,
                    _ => homestay.base_nightly_price,
                };
                (price, weekend, false)
            }
        };

        nightly_prices.push(NightlyPrice {
            date,
            price,
            is_weekend,
            is_custom,
        });
        base_amount += price;
        date = date.succ_opt().expect("date range within chrono bounds");
    }

    let hundred = Decimal::from(100);
    let discount_amount = if nights >= MONTHLY_DISCOUNT_THRESHOLD {
        homestay
            .monthly_discount
            .map(|pct| base_amount * pct / hundred)
    } else {
        None
    }
    .or_else(|| {
        if nights >= WEEKLY_DISCOUNT_THRESHOLD {
            homestay
                .weekly_discount
                .map(|pct| base_amount * pct / hundred)
        } else {
            None
        }
    })
    .unwrap_or(Decimal::ZERO);

    let discounted_base = base_amount - discount_amount;
    let cleaning_fee = round_money(discounted_base * rates.cleaning);
    let service_fee = round_money(discounted_base * rates.service);
    let tax_amount = round_money((discounted_base + cleaning_fee + service_fee) * rates.tax);
    let total_amount = discounted_base + cleaning_fee + service_fee + tax_amount;

    Ok(PriceBreakdown {
        nights,
        nightly_prices,
        base_amount,
        discount_amount,
        cleaning_fee,
        service_fee,
        tax_amount,
        total_amount,
    })
}
