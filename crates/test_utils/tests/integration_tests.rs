//! Cross-domain integration tests
//!
//! End-to-end scenarios that thread a document through totals computation,
//! an installment plan, the status cascade, and into the treasury figures.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Money, PeriodKind, PeriodWindow};
use test_utils::{
    assert_money_eq, assert_sum_matches, assert_totals_consistent, DateFixtures, DocumentBuilder,
    PlanBuilder, TreasuryBookBuilder,
};

mod invoice_to_plan_workflow {
    use super::*;
    use domain_documents::compute_totals;
    use domain_installments::{
        derive_plan_status, generate_installments, set_installment_status, GenerationOutcome,
        InstallmentStatus, PlanStatus,
    };

    /// An invoice's TTC flows into a plan whose installments sum back to it
    #[test]
    fn test_invoice_ttc_becomes_plan_total() {
        let (document, catalog) = DocumentBuilder::new()
            .discounted_line(dec!(2), Money::new(dec!(100)), dec!(10))
            .line(dec!(1), Money::new(dec!(50)))
            .build();

        let totals = compute_totals(&document, &catalog).unwrap();
        assert_totals_consistent(&totals);
        assert_money_eq(totals.ttc, Money::new(dec!(277.437)));

        let mut plan = PlanBuilder::new().total(totals.ttc).count(3).build();
        let outcome = generate_installments(&mut plan).unwrap();
        assert_eq!(outcome, GenerationOutcome::Generated { count: 3 });
        assert_sum_matches(&plan);
        assert_money_eq(plan.installments[0].amount, Money::new(dec!(92.479)));
    }

    /// Paying installments one by one walks the plan through all three states
    #[test]
    fn test_status_cascade_progression() {
        let mut plan = PlanBuilder::new()
            .total(Money::new(dec!(300)))
            .count(3)
            .build();
        generate_installments(&mut plan).unwrap();
        assert_eq!(plan.status, PlanStatus::Unpaid);

        let ids: Vec<_> = plan.installments.iter().map(|i| i.id).collect();

        let status = set_installment_status(&mut plan, ids[0], InstallmentStatus::Paid).unwrap();
        assert_eq!(status, PlanStatus::PartiallyPaid);

        set_installment_status(&mut plan, ids[1], InstallmentStatus::Paid).unwrap();
        let status = set_installment_status(&mut plan, ids[2], InstallmentStatus::Paid).unwrap();
        assert_eq!(status, PlanStatus::Paid);

        // Reverting one payment drops the plan back to partially paid.
        let status = set_installment_status(&mut plan, ids[1], InstallmentStatus::Unpaid).unwrap();
        assert_eq!(status, PlanStatus::PartiallyPaid);
        assert_eq!(derive_plan_status(&plan.installments), status);
    }
}

mod treasury_dashboard_workflow {
    use super::*;
    use domain_treasury::{compute_kpis, KpiParams, Side};

    /// The builder-assembled book produces consistent headline figures
    #[test]
    fn test_book_flows_into_kpis() {
        let today = DateFixtures::today();
        let in_week = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

        let book = TreasuryBookBuilder::new()
            .settled_order(in_week, dec!(1500))
            .pending_order(in_week, dec!(600))
            .settled_supplier_invoice(in_week, dec!(400))
            .installment_due(Side::Client, in_week, dec!(250), true)
            .payroll(in_week, dec!(900), false)
            .build();

        let bundle = compute_kpis(&book, &KpiParams::weekly(today)).unwrap();

        assert_money_eq(bundle.income.value, Money::new(dec!(1750)));
        assert_money_eq(bundle.expense.value, Money::new(dec!(400)));
        assert_money_eq(bundle.balance.value, Money::new(dec!(1350)));
        assert_money_eq(bundle.expected_income.value, Money::new(dec!(600)));
        assert_money_eq(bundle.expected_expense.value, Money::new(dec!(900)));
        assert_money_eq(bundle.forecast.value, Money::new(dec!(1050)));
    }

    /// Week windows agree between the period math and the aggregation
    #[test]
    fn test_window_agreement() {
        let today = DateFixtures::today();
        let window = PeriodWindow::for_offset(PeriodKind::Week, 0, today);
        assert_eq!(window.start, DateFixtures::week_start());
        assert!(window.contains(today));
        assert_eq!(window.days(), 7);
    }
}
