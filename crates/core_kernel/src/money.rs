//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! All amounts are denominated in a single currency whose sub-unit is the
//! millime (three decimal places).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Number of sub-unit decimal places (millimes).
pub const MILLIME_DP: u32 = 3;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Cannot split into zero parts")]
    ZeroParts,
}

/// A monetary amount with millime precision
///
/// Money wraps rust_decimal so that sums reconcile exactly across many
/// line items. The constructor does not round: amounts stay exact until a
/// calculation step explicitly calls for rounding (see [`Money::round_millimes`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value from an exact decimal amount
    pub fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Creates Money from an integer amount in millimes
    pub fn from_millimes(millimes: i64) -> Self {
        Self {
            amount: Decimal::new(millimes, MILLIME_DP),
        }
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
        }
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
        }
    }

    /// Rounds half-up to millime precision
    ///
    /// Half-up matches the rounding applied to tax and surcharge amounts on
    /// fiscal documents; banker's rounding would drift from the printed values.
    pub fn round_millimes(&self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(MILLIME_DP, RoundingStrategy::MidpointAwayFromZero),
        }
    }

    /// Multiplies by a scalar (e.g. a quantity or a rate)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor)
    }

    /// Divides by a scalar
    pub fn checked_div(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.amount / divisor))
    }

    /// Clamps a negative amount to zero
    pub fn clamp_non_negative(&self) -> Self {
        if self.is_negative() {
            Self::zero()
        } else {
            *self
        }
    }

    /// Splits the amount into `n` parts of millime precision
    ///
    /// The first `n - 1` parts are the half-up rounded quotient; the last
    /// part absorbs the rounding remainder so the parts always sum back to
    /// the original amount exactly.
    pub fn split(&self, n: u32) -> Result<Vec<Money>, MoneyError> {
        if n == 0 {
            return Err(MoneyError::ZeroParts);
        }

        let per_part = self.checked_div(Decimal::from(n))?.round_millimes();
        let mut parts = vec![per_part; (n - 1) as usize];
        let allocated: Decimal = per_part.amount * Decimal::from(n - 1);
        parts.push(Self::new(self.amount - allocated));
        Ok(parts)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} DT", self.amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.amount + other.amount)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.amount += other.amount;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.amount - other.amount)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.amount -= other.amount;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.amount
    }
}

/// Represents a percentage rate (e.g. a tax rate or surcharge rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate {
    /// The rate as a decimal (e.g. 0.19 for 19%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g. 0.19 for 19%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g. 19.0 for 19%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount (exact, no rounding)
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.500));
        assert_eq!(m.amount(), dec!(100.500));
    }

    #[test]
    fn test_money_from_millimes() {
        let m = Money::from_millimes(100_500);
        assert_eq!(m.amount(), dec!(100.500));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.000));
        let b = Money::new(dec!(50.250));

        assert_eq!((a + b).amount(), dec!(150.250));
        assert_eq!((a - b).amount(), dec!(49.750));
        assert_eq!((-b).amount(), dec!(-50.250));
    }

    #[test]
    fn test_round_millimes_half_up() {
        assert_eq!(Money::new(dec!(1.2345)).round_millimes().amount(), dec!(1.235));
        assert_eq!(Money::new(dec!(1.2344)).round_millimes().amount(), dec!(1.234));
        assert_eq!(Money::new(dec!(-1.2345)).round_millimes().amount(), dec!(-1.235));
    }

    #[test]
    fn test_split_sum_is_exact() {
        let total = Money::new(dec!(277.437));
        let parts = total.split(3).unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].amount(), dec!(92.479));
        assert_eq!(parts[1].amount(), dec!(92.479));
        assert_eq!(parts.iter().copied().sum::<Money>(), total);
    }

    #[test]
    fn test_split_zero_parts() {
        let result = Money::new(dec!(10)).split(0);
        assert_eq!(result, Err(MoneyError::ZeroParts));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::new(dec!(-5)).clamp_non_negative(), Money::zero());
        assert_eq!(Money::new(dec!(5)).clamp_non_negative(), Money::new(dec!(5)));
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(19));
        let amount = Money::new(dec!(232.300));

        let vat = rate.apply(&amount).round_millimes();
        assert_eq!(vat.amount(), dec!(44.137));
    }
}
