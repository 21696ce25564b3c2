//! Installment / plan status cascade
//!
//! The plan's aggregate status is a pure function of its installments'
//! statuses, recomputed by a full scan of the siblings on every installment
//! write. Callers never set the plan status directly. Persistence adapters
//! must run the installment write and the plan update inside one
//! transaction so the two levels can never be observed out of sync.

use tracing::debug;

use core_kernel::InstallmentId;

use crate::error::InstallmentError;
use crate::plan::{Installment, InstallmentPlan, InstallmentStatus, PlanStatus};

/// Derives the plan status from a set of installment statuses
///
/// - all paid => `Paid`
/// - at least one paid, not all => `PartiallyPaid`
/// - none paid (or no installments) => `Unpaid`
pub fn derive_plan_status(installments: &[Installment]) -> PlanStatus {
    let paid = installments
        .iter()
        .filter(|i| i.status == InstallmentStatus::Paid)
        .count();

    if paid == 0 {
        PlanStatus::Unpaid
    } else if paid == installments.len() {
        PlanStatus::Paid
    } else {
        PlanStatus::PartiallyPaid
    }
}

/// Updates one installment's status and cascades to the plan
///
/// Returns the recomputed plan status. Setting an installment back to
/// unpaid is an administrative reversal; it flows through the same scan.
pub fn set_installment_status(
    plan: &mut InstallmentPlan,
    installment_id: InstallmentId,
    status: InstallmentStatus,
) -> Result<PlanStatus, InstallmentError> {
    let installment = plan
        .installments
        .iter_mut()
        .find(|i| i.id == installment_id)
        .ok_or_else(|| InstallmentError::InstallmentNotFound(installment_id.to_string()))?;

    installment.status = status;

    let plan_status = derive_plan_status(&plan.installments);
    plan.status = plan_status;
    plan.updated_at = chrono::Utc::now();

    debug!(
        plan = %plan.id,
        installment = %installment_id,
        ?status,
        ?plan_status,
        "installment status updated, plan status recomputed"
    );
    Ok(plan_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_installments;
    use chrono::NaiveDate;
    use core_kernel::Money;
    use rust_decimal_macros::dec;

    fn plan_with(n: u32) -> InstallmentPlan {
        let mut plan = InstallmentPlan::new(
            Money::new(dec!(240)),
            n,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        );
        generate_installments(&mut plan).unwrap();
        plan
    }

    #[test]
    fn test_one_paid_makes_plan_partially_paid() {
        let mut plan = plan_with(3);
        let first = plan.installments[0].id;

        let status = set_installment_status(&mut plan, first, InstallmentStatus::Paid).unwrap();
        assert_eq!(status, PlanStatus::PartiallyPaid);
        assert_eq!(plan.status, PlanStatus::PartiallyPaid);
    }

    #[test]
    fn test_all_paid_makes_plan_paid() {
        let mut plan = plan_with(3);
        let ids: Vec<_> = plan.installments.iter().map(|i| i.id).collect();

        for id in &ids {
            set_installment_status(&mut plan, *id, InstallmentStatus::Paid).unwrap();
        }
        assert_eq!(plan.status, PlanStatus::Paid);
    }

    #[test]
    fn test_reversal_cascades_back() {
        let mut plan = plan_with(2);
        let ids: Vec<_> = plan.installments.iter().map(|i| i.id).collect();
        for id in &ids {
            set_installment_status(&mut plan, *id, InstallmentStatus::Paid).unwrap();
        }

        let status =
            set_installment_status(&mut plan, ids[0], InstallmentStatus::Unpaid).unwrap();
        assert_eq!(status, PlanStatus::PartiallyPaid);

        let status =
            set_installment_status(&mut plan, ids[1], InstallmentStatus::Unpaid).unwrap();
        assert_eq!(status, PlanStatus::Unpaid);
    }

    #[test]
    fn test_unknown_installment_rejected() {
        let mut plan = plan_with(2);
        let result =
            set_installment_status(&mut plan, InstallmentId::new(), InstallmentStatus::Paid);
        assert!(matches!(
            result,
            Err(InstallmentError::InstallmentNotFound(_))
        ));
        // nothing partially applied
        assert_eq!(plan.status, PlanStatus::Unpaid);
    }

    #[test]
    fn test_empty_plan_is_unpaid() {
        assert_eq!(derive_plan_status(&[]), PlanStatus::Unpaid);
    }
}
