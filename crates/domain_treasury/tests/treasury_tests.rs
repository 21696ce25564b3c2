//! End-to-end tests for the treasury read model: aggregation routing,
//! trend math, chart series, schedule and alerts over a realistic book.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AdvanceId, DocumentId, InstallmentId, Money, PayrollId, PeriodKind, PeriodWindow, QuoteId};
use domain_treasury::{
    build_balance_series, build_schedule, compute_kpis, compute_trend, expected_expense,
    expected_income, expense, income, overdue_receivables, recovery_rate, transaction_count,
    AdvanceEntry,
    AlertSeverity, AlertThresholds, ChartWindow, CreditNoteRecord, InstallmentDue, KpiParams,
    OrderRecord, PaymentMode, PayrollEntry, QuoteEntry, Side, SupplierInvoiceRecord, TreasuryBook,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Saturday; its Monday-start week runs 24/08 through 30/08.
fn reference() -> NaiveDate {
    date(2026, 8, 29)
}

fn this_week() -> PeriodWindow {
    PeriodWindow::for_offset(PeriodKind::Week, 0, reference())
}

fn order(
    client: &str,
    day: NaiveDate,
    mode: PaymentMode,
    total: Decimal,
    settled: bool,
) -> OrderRecord {
    OrderRecord {
        id: DocumentId::new(),
        client_name: client.to_string(),
        order_date: day,
        payment_mode: mode,
        total_ttc: Some(total),
        mixed_cash_portion: None,
        settled,
        on_installment_plan: false,
    }
}

fn supplier_invoice(
    supplier: &str,
    day: NaiveDate,
    mode: PaymentMode,
    total: Decimal,
    settled: bool,
) -> SupplierInvoiceRecord {
    SupplierInvoiceRecord {
        id: DocumentId::new(),
        supplier_name: supplier.to_string(),
        invoice_date: day,
        payment_mode: mode,
        total: Some(total),
        mixed_cash_portion: None,
        settled,
    }
}

fn installment(side: Side, day: NaiveDate, amount: Decimal, paid: bool) -> InstallmentDue {
    InstallmentDue {
        id: InstallmentId::new(),
        side,
        counterparty: "Comptoir du Sud".to_string(),
        due_date: day,
        amount: Some(amount),
        paid,
    }
}

fn payroll(day: NaiveDate, net: Decimal, disbursed: bool) -> PayrollEntry {
    PayrollEntry {
        id: PayrollId::new(),
        employee_name: "Amel Ben Salah".to_string(),
        pay_date: day,
        net_pay: Some(net),
        disbursed,
    }
}

#[test]
fn test_income_routes_by_payment_mode() {
    let mut book = TreasuryBook::new();
    let day = date(2026, 8, 25);
    book.orders.push(order("Atlas", day, PaymentMode::Cash, dec!(1000), true));
    book.orders.push(order("Atlas", day, PaymentMode::Transfer, dec!(500), true));
    // Installment-mode orders are collected through the plan, not here.
    book.orders.push(order("Atlas", day, PaymentMode::Installment, dec!(9000), true));
    // Mixed orders contribute only their cash portion.
    let mut mixed = order("Atlas", day, PaymentMode::Mixed, dec!(2000), true);
    mixed.mixed_cash_portion = Some(dec!(300));
    book.orders.push(mixed);
    // Unsettled orders never count as income.
    book.orders.push(order("Atlas", day, PaymentMode::Cash, dec!(700), false));

    assert_eq!(income(&book, &this_week()), Money::new(dec!(1800)));
}

#[test]
fn test_income_includes_paid_client_installments_and_credit_notes() {
    let mut book = TreasuryBook::new();
    let day = date(2026, 8, 26);
    book.installments.push(installment(Side::Client, day, dec!(400), true));
    book.installments.push(installment(Side::Client, day, dec!(999), false));
    book.installments.push(installment(Side::Supplier, day, dec!(111), true));
    book.credit_notes.push(CreditNoteRecord {
        id: DocumentId::new(),
        supplier_name: "Grossiste Nord".to_string(),
        note_date: day,
        total: Some(dec!(50)),
        settled: true,
    });

    assert_eq!(income(&book, &this_week()), Money::new(dec!(450)));
}

#[test]
fn test_income_respects_the_window() {
    let mut book = TreasuryBook::new();
    book.orders.push(order("Atlas", date(2026, 8, 24), PaymentMode::Cash, dec!(100), true));
    book.orders.push(order("Atlas", date(2026, 8, 30), PaymentMode::Cash, dec!(200), true));
    // Previous week.
    book.orders.push(order("Atlas", date(2026, 8, 23), PaymentMode::Cash, dec!(5000), true));

    assert_eq!(income(&book, &this_week()), Money::new(dec!(300)));
}

#[test]
fn test_expense_aggregation() {
    let mut book = TreasuryBook::new();
    let day = date(2026, 8, 27);
    book.supplier_invoices.push(supplier_invoice("Grossiste", day, PaymentMode::Cheque, dec!(600), true));
    book.supplier_invoices.push(supplier_invoice("Grossiste", day, PaymentMode::Cheque, dec!(999), false));
    let mut mixed = supplier_invoice("Grossiste", day, PaymentMode::Mixed, dec!(1000), true);
    mixed.mixed_cash_portion = Some(dec!(250));
    book.supplier_invoices.push(mixed);
    book.installments.push(installment(Side::Supplier, day, dec!(150), true));
    book.payroll.push(payroll(day, dec!(1200), true));
    book.payroll.push(payroll(day, dec!(888), false));
    book.advances.push(AdvanceEntry {
        id: AdvanceId::new(),
        employee_name: "Karim".to_string(),
        request_date: day,
        amount: Some(dec!(500)),
        reimbursed: Some(dec!(200)),
        accepted: true,
        disbursed: true,
    });

    // 600 + 250 + 150 + 1200 + (500 - 200)
    assert_eq!(expense(&book, &this_week()), Money::new(dec!(2500)));
}

#[test]
fn test_over_reimbursed_advance_clamps_to_zero() {
    let mut book = TreasuryBook::new();
    book.advances.push(AdvanceEntry {
        id: AdvanceId::new(),
        employee_name: "Karim".to_string(),
        request_date: date(2026, 8, 27),
        amount: Some(dec!(100)),
        reimbursed: Some(dec!(150)),
        accepted: true,
        disbursed: true,
    });
    assert_eq!(expense(&book, &this_week()), Money::zero());
}

#[test]
fn test_expected_income_excludes_plans_and_converted_quotes() {
    let mut book = TreasuryBook::new();
    let day = date(2026, 8, 28);
    book.orders.push(order("Atlas", day, PaymentMode::Cash, dec!(800), false));
    let mut planned = order("Atlas", day, PaymentMode::Cash, dec!(5000), false);
    planned.on_installment_plan = true;
    book.orders.push(planned);
    book.orders.push(order("Atlas", day, PaymentMode::Installment, dec!(4000), false));
    book.installments.push(installment(Side::Client, day, dec!(120), false));
    book.quotes.push(QuoteEntry {
        id: QuoteId::new(),
        client_name: "Atlas".to_string(),
        issue_date: day,
        total_ttc: Some(dec!(60)),
        accepted: true,
        converted: false,
    });
    book.quotes.push(QuoteEntry {
        id: QuoteId::new(),
        client_name: "Atlas".to_string(),
        issue_date: day,
        total_ttc: Some(dec!(999)),
        accepted: true,
        converted: true,
    });

    assert_eq!(expected_income(&book, &this_week()), Money::new(dec!(980)));
}

#[test]
fn test_expected_expense_aggregation() {
    let mut book = TreasuryBook::new();
    let day = date(2026, 8, 28);
    book.supplier_invoices.push(supplier_invoice("Grossiste", day, PaymentMode::Transfer, dec!(300), false));
    book.installments.push(installment(Side::Supplier, day, dec!(75), false));
    book.payroll.push(payroll(day, dec!(1100), false));
    book.advances.push(AdvanceEntry {
        id: AdvanceId::new(),
        employee_name: "Karim".to_string(),
        request_date: day,
        amount: Some(dec!(200)),
        reimbursed: None,
        accepted: true,
        disbursed: false,
    });

    assert_eq!(expected_expense(&book, &this_week()), Money::new(dec!(1675)));
}

#[test]
fn test_missing_amounts_count_as_zero() {
    let mut book = TreasuryBook::new();
    let day = date(2026, 8, 25);
    let mut no_total = order("Atlas", day, PaymentMode::Cash, dec!(0), true);
    no_total.total_ttc = None;
    book.orders.push(no_total);
    let mut sparse = installment(Side::Client, day, dec!(0), true);
    sparse.amount = None;
    book.installments.push(sparse);

    assert_eq!(income(&book, &this_week()), Money::zero());
    assert_eq!(transaction_count(&book, &this_week()), 2);
}

#[test]
fn test_trend_convention() {
    assert_eq!(compute_trend(Money::zero(), Money::zero()), Decimal::ZERO);
    assert_eq!(compute_trend(Money::new(dec!(1)), Money::zero()), dec!(100));
    assert_eq!(
        compute_trend(Money::new(dec!(120)), Money::new(dec!(100))),
        dec!(20.00)
    );
    assert_eq!(
        compute_trend(Money::zero(), Money::new(dec!(100))),
        dec!(-100.00)
    );
}

#[test]
fn test_kpi_bundle_forecast_and_trends() {
    let mut book = TreasuryBook::new();
    // Current week: 1000 in, 400 out; 300 expected in, 100 expected out.
    book.orders.push(order("Atlas", date(2026, 8, 25), PaymentMode::Cash, dec!(1000), true));
    book.supplier_invoices.push(supplier_invoice("Grossiste", date(2026, 8, 25), PaymentMode::Cash, dec!(400), true));
    book.orders.push(order("Atlas", date(2026, 8, 26), PaymentMode::Cash, dec!(300), false));
    book.supplier_invoices.push(supplier_invoice("Grossiste", date(2026, 8, 26), PaymentMode::Cash, dec!(100), false));
    // Previous week: 500 in.
    book.orders.push(order("Atlas", date(2026, 8, 18), PaymentMode::Cash, dec!(500), true));

    let bundle = compute_kpis(&book, &KpiParams::weekly(reference())).unwrap();

    assert_eq!(bundle.income.value, Money::new(dec!(1000)));
    assert_eq!(bundle.income.trend, dec!(100.00));
    assert_eq!(bundle.expense.value, Money::new(dec!(400)));
    assert_eq!(bundle.balance.value, Money::new(dec!(600)));
    assert_eq!(bundle.expected_income.value, Money::new(dec!(300)));
    assert_eq!(bundle.expected_expense.value, Money::new(dec!(100)));
    // 600 + 300 - 100
    assert_eq!(bundle.forecast.value, Money::new(dec!(800)));
    assert!(bundle.balance.positive);
    assert_eq!(bundle.transaction_count, 4);
}

#[test]
fn test_recovery_rate() {
    let mut book = TreasuryBook::new();
    let day = date(2026, 8, 25);
    book.orders.push(order("Atlas", day, PaymentMode::Cash, dec!(600), true));
    book.orders.push(order("Atlas", day, PaymentMode::Cash, dec!(400), false));
    assert_eq!(recovery_rate(&book, &this_week()), dec!(60.00));

    let empty = TreasuryBook::new();
    assert_eq!(recovery_rate(&empty, &this_week()), Decimal::ZERO);
}

#[test]
fn test_overdue_receivables_snapshot() {
    let mut book = TreasuryBook::new();
    // overdue: unpaid client dues strictly before the reference date
    book.installments
        .push(installment(Side::Client, date(2026, 7, 10), dec!(400), false));
    book.installments
        .push(installment(Side::Client, date(2026, 8, 28), dec!(150), false));
    // not overdue: due today, already paid, or sitting on the supplier side
    book.installments
        .push(installment(Side::Client, reference(), dec!(90), false));
    book.installments
        .push(installment(Side::Client, date(2026, 8, 1), dec!(75), true));
    book.installments
        .push(installment(Side::Supplier, date(2026, 8, 1), dec!(60), false));

    let (total, count) = overdue_receivables(&book, reference());
    assert_eq!(total.amount(), dec!(550));
    assert_eq!(count, 2);
}

#[test]
fn test_kpis_carry_overdue_backlog_with_trend() {
    let mut book = TreasuryBook::new();
    book.installments
        .push(installment(Side::Client, date(2026, 8, 10), dec!(200), false));
    book.installments
        .push(installment(Side::Client, date(2026, 8, 25), dec!(300), false));

    let bundle = compute_kpis(&book, &KpiParams::weekly(reference())).unwrap();
    assert_eq!(bundle.overdue.value.amount(), dec!(500));
    assert_eq!(bundle.overdue_count, 2);
    // backlog grew from 200 at the week start to 500 on the reference date
    assert_eq!(bundle.overdue.trend, dec!(150.00));
    assert!(!bundle.overdue.positive);
}

#[test]
fn test_chart_points_reaggregate_per_week() {
    let mut book = TreasuryBook::new();
    book.orders.push(order("Atlas", date(2026, 8, 18), PaymentMode::Cash, dec!(250), true));
    book.orders.push(order("Atlas", date(2026, 8, 25), PaymentMode::Cash, dec!(900), true));
    book.supplier_invoices.push(supplier_invoice("Grossiste", date(2026, 8, 25), PaymentMode::Cash, dec!(150), true));

    let series = build_balance_series(&book, reference(), ChartWindow::FourWeeks);
    assert_eq!(series.len(), 4);
    assert_eq!(series[0].balance, dec!(0.000));
    assert_eq!(series[2].balance, dec!(250.000));
    assert_eq!(series[3].balance, dec!(750.000));
    assert_eq!(series[3].label, "24/08");
}

#[test]
fn test_kpis_include_threshold_alerts() {
    let mut book = TreasuryBook::new();
    // Forecast well below 5000 and a negative balance.
    book.supplier_invoices.push(supplier_invoice("Grossiste", date(2026, 8, 25), PaymentMode::Cash, dec!(2000), true));
    // A large upcoming receipt feeds an info alert through the schedule.
    book.orders.push(order("Atlas", date(2026, 9, 15), PaymentMode::Cash, dec!(25000), false));

    let bundle = compute_kpis(&book, &KpiParams::weekly(reference())).unwrap();
    let severities: Vec<AlertSeverity> = bundle.alerts.iter().map(|a| a.severity).collect();
    assert!(severities.contains(&AlertSeverity::Critical));
    assert!(severities.contains(&AlertSeverity::Danger));
    assert!(severities.contains(&AlertSeverity::Info));
}

#[test]
fn test_schedule_horizon_and_order() {
    let mut book = TreasuryBook::new();
    book.orders.push(order("Atlas", date(2026, 9, 20), PaymentMode::Cash, dec!(100), false));
    book.installments.push(installment(Side::Client, date(2026, 9, 5), dec!(40), false));
    book.installments.push(installment(Side::Supplier, date(2026, 9, 10), dec!(30), false));
    book.payroll.push(payroll(date(2026, 9, 1), dec!(900), false));
    // Behind the reference date, never scheduled.
    book.payroll.push(payroll(date(2026, 8, 1), dec!(900), false));

    let events = build_schedule(&book, reference(), Some(date(2026, 9, 15)));
    let dates: Vec<NaiveDate> = events.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 9, 1), date(2026, 9, 5), date(2026, 9, 10)]
    );
    assert!(events[0].amount.is_negative());
    assert!(events[1].amount.is_positive());
    assert!(events[2].amount.is_negative());
}

#[test]
fn test_monthly_and_quarterly_offsets() {
    let mut book = TreasuryBook::new();
    book.orders.push(order("Atlas", date(2026, 7, 10), PaymentMode::Cash, dec!(111), true));
    book.orders.push(order("Atlas", date(2026, 8, 10), PaymentMode::Cash, dec!(222), true));

    let last_month = PeriodWindow::for_offset(PeriodKind::Month, 1, reference());
    assert_eq!(income(&book, &last_month), Money::new(dec!(111)));

    // Q3 2026 covers both dates.
    let quarter = PeriodWindow::for_offset(PeriodKind::Quarter, 0, reference());
    assert_eq!(income(&book, &quarter), Money::new(dec!(333)));
}

#[test]
fn test_custom_thresholds_flow_through_params() {
    let mut book = TreasuryBook::new();
    book.orders.push(order("Atlas", date(2026, 8, 25), PaymentMode::Cash, dec!(100), true));

    let mut params = KpiParams::weekly(reference());
    params.thresholds = AlertThresholds {
        forecast_floor: dec!(50),
        large_event: dec!(1000000),
    };
    let bundle = compute_kpis(&book, &params).unwrap();
    assert!(bundle.alerts.is_empty());
}
