//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_documents::DocumentTotals;
use domain_installments::InstallmentPlan;

/// Asserts that two Money values are exactly equal
pub fn assert_money_eq(actual: Money, expected: Money) {
    assert_eq!(
        actual, expected,
        "Money mismatch: actual={}, expected={}",
        actual, expected
    );
}

/// Asserts that two Money values are approximately equal within a tolerance
pub fn assert_money_approx_eq(actual: Money, expected: Money, tolerance: Decimal) {
    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: Money) {
    assert!(money.is_positive(), "Expected positive money, got {}", money);
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts the totals identity: HT + surcharge + VAT + stamp == TTC
pub fn assert_totals_consistent(totals: &DocumentTotals) {
    let sum = totals.ht + totals.surcharge + totals.vat + totals.stamp;
    assert_eq!(
        sum, totals.ttc,
        "Totals identity broken: components sum to {} but TTC is {}",
        sum, totals.ttc
    );
}

/// Asserts that a plan's installments sum exactly to its total
pub fn assert_sum_matches(plan: &InstallmentPlan) {
    assert_eq!(
        plan.installment_total(),
        plan.total,
        "Installments sum to {} but the plan total is {}",
        plan.installment_total(),
        plan.total
    );
}
