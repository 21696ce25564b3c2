//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Money;

/// Strategy for positive amounts expressed in millimes
pub fn positive_millimes_strategy() -> impl Strategy<Value = i64> {
    1i64..2_000_000_000i64
}

/// Strategy for amounts in millimes, negative values included
pub fn millimes_strategy() -> impl Strategy<Value = i64> {
    -2_000_000_000i64..2_000_000_000i64
}

/// Strategy for positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    positive_millimes_strategy().prop_map(Money::from_millimes)
}

/// Strategy for Money values of either sign
pub fn money_strategy() -> impl Strategy<Value = Money> {
    millimes_strategy().prop_map(Money::from_millimes)
}

/// Strategy for discount percentages (0.00 to 100.00, basis-point steps)
pub fn discount_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10001u32).prop_map(|bp| Decimal::new(bp as i64, 2))
}

/// Strategy for VAT-style percentage rates (0.00 to 100.00)
pub fn tax_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10001u32).prop_map(|bp| Decimal::new(bp as i64, 2))
}

/// Strategy for installment counts within the domain bound
pub fn installment_count_strategy() -> impl Strategy<Value = u32> {
    1u32..25u32
}

/// Strategy for line quantities
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..500i64).prop_map(Decimal::from)
}

/// Strategy for dates within a few years of the reference date
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..1460i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}
