//! Installment batch generation
//!
//! Generation is idempotent: a plan that already has installments is left
//! untouched, which makes retried requests safe. The split guarantees that
//! the installment amounts always sum back to the plan total exactly, with
//! the rounding remainder absorbed by the final installment.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::InstallmentId;

use crate::error::InstallmentError;
use crate::plan::{Installment, InstallmentPlan, InstallmentStatus, MAX_INSTALLMENTS};

/// Outcome of a generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Installments were created in this call
    Generated { count: u32 },
    /// The plan already had installments; nothing was changed
    AlreadyGenerated,
    /// Zero total or zero count; flagged as a no-op rather than an error
    NothingToGenerate,
}

/// Generates the plan's installments in one batch
///
/// Due date of installment `i` is `first_due + i * period_days`. All
/// installments start out unpaid. The caller is responsible for persisting
/// plan and installments inside a single transaction.
pub fn generate_installments(
    plan: &mut InstallmentPlan,
) -> Result<GenerationOutcome, InstallmentError> {
    if plan.has_installments() {
        debug!(plan = %plan.id, "plan already has installments, skipping generation");
        return Ok(GenerationOutcome::AlreadyGenerated);
    }
    if plan.total.is_zero() || plan.count == 0 {
        return Ok(GenerationOutcome::NothingToGenerate);
    }
    if plan.total.is_negative() {
        return Err(InstallmentError::NegativeTotal(plan.total.to_string()));
    }
    if plan.count > MAX_INSTALLMENTS {
        return Err(InstallmentError::InvalidCount(plan.count));
    }
    if plan.period_days == 0 {
        return Err(InstallmentError::InvalidPeriod(plan.period_days));
    }

    let amounts = plan
        .total
        .split(plan.count)
        .expect("count validated non-zero");

    plan.installments = amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| Installment {
            id: InstallmentId::new_v7(),
            plan_id: plan.id,
            sequence: i as u32,
            due_date: plan.first_due + Duration::days(i as i64 * plan.period_days as i64),
            amount,
            status: InstallmentStatus::Unpaid,
            bank_reference: None,
            acceptance: None,
        })
        .collect();

    debug!(plan = %plan.id, count = plan.count, "generated installment batch");
    Ok(GenerationOutcome::Generated { count: plan.count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Money;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_generation_splits_total() {
        let mut plan = InstallmentPlan::new(Money::new(dec!(277.437)), 3, d(2026, 9, 10));
        let outcome = generate_installments(&mut plan).unwrap();

        assert_eq!(outcome, GenerationOutcome::Generated { count: 3 });
        assert_eq!(plan.installments.len(), 3);
        assert_eq!(plan.installment_total(), plan.total);
        assert_eq!(plan.installments[0].amount.amount(), dec!(92.479));
    }

    #[test]
    fn test_due_date_spacing() {
        let mut plan = InstallmentPlan::new(Money::new(dec!(300)), 3, d(2026, 9, 10));
        generate_installments(&mut plan).unwrap();

        assert_eq!(plan.installments[0].due_date, d(2026, 9, 10));
        assert_eq!(plan.installments[1].due_date, d(2026, 10, 10));
        assert_eq!(plan.installments[2].due_date, d(2026, 11, 9));
    }

    #[test]
    fn test_custom_period() {
        let mut plan =
            InstallmentPlan::new(Money::new(dec!(100)), 2, d(2026, 9, 1)).with_period_days(15);
        generate_installments(&mut plan).unwrap();

        assert_eq!(plan.installments[1].due_date, d(2026, 9, 16));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let mut plan = InstallmentPlan::new(Money::new(dec!(300)), 3, d(2026, 9, 10));
        generate_installments(&mut plan).unwrap();
        let first_ids: Vec<_> = plan.installments.iter().map(|i| i.id).collect();

        let outcome = generate_installments(&mut plan).unwrap();
        assert_eq!(outcome, GenerationOutcome::AlreadyGenerated);
        let second_ids: Vec<_> = plan.installments.iter().map(|i| i.id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_zero_total_is_noop() {
        let mut plan = InstallmentPlan::new(Money::zero(), 3, d(2026, 9, 10));
        let outcome = generate_installments(&mut plan).unwrap();
        assert_eq!(outcome, GenerationOutcome::NothingToGenerate);
        assert!(plan.installments.is_empty());
    }

    #[test]
    fn test_zero_count_is_noop() {
        let mut plan = InstallmentPlan::new(Money::new(dec!(100)), 0, d(2026, 9, 10));
        let outcome = generate_installments(&mut plan).unwrap();
        assert_eq!(outcome, GenerationOutcome::NothingToGenerate);
    }

    #[test]
    fn test_count_above_bound_rejected() {
        let mut plan = InstallmentPlan::new(Money::new(dec!(100)), 25, d(2026, 9, 10));
        let result = generate_installments(&mut plan);
        assert_eq!(result, Err(InstallmentError::InvalidCount(25)));
        assert!(plan.installments.is_empty());
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut plan = InstallmentPlan::new(Money::new(dec!(-5)), 2, d(2026, 9, 10));
        assert!(matches!(
            generate_installments(&mut plan),
            Err(InstallmentError::NegativeTotal(_))
        ));
    }
}
