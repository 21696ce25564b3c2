//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities. Fixtures are deterministic
//! so assertions against them stay exact.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Money, Rate};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A round hundred dinars
    pub fn dt_100() -> Money {
        Money::new(dec!(100.000))
    }

    /// The worked-example HT amount
    pub fn ht_example() -> Money {
        Money::new(dec!(230.000))
    }

    /// The worked-example TTC amount
    pub fn ttc_example() -> Money {
        Money::new(dec!(277.437))
    }

    /// Standard stamp duty
    pub fn stamp_duty() -> Money {
        Money::new(dec!(1.000))
    }

    /// A zero amount
    pub fn zero() -> Money {
        Money::zero()
    }

    /// A negative amount for credit note scenarios
    pub fn refund() -> Money {
        Money::new(dec!(-50.000))
    }
}

/// Fixture for tax rates
pub struct RateFixtures;

impl RateFixtures {
    /// The standard 19% VAT rate
    pub fn vat_standard() -> Rate {
        Rate::from_percentage(dec!(19))
    }

    /// The reduced 7% VAT rate
    pub fn vat_reduced() -> Rate {
        Rate::from_percentage(dec!(7))
    }

    /// Zero-rated VAT
    pub fn vat_zero() -> Rate {
        Rate::from_percentage(dec!(0))
    }
}

/// Fixture for temporal test data
pub struct DateFixtures;

impl DateFixtures {
    /// Reference "today" used across the suite (a Saturday)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    /// Monday of the reference week
    pub fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    /// A first due date comfortably in the future
    pub fn first_due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 10).unwrap()
    }

    /// An issue date inside the reference month
    pub fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
    }
}
