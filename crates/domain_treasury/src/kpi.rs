//! Treasury KPI aggregation engine
//!
//! For a caller-specified period kind and offset, aggregates the book's
//! heterogeneous records into the dashboard's headline figures, each
//! paired with a trend against the immediately preceding period of
//! equal kind.
//!
//! Trend convention: 0% when both periods are zero, 100% when only the
//! previous period is zero, otherwise `(current - previous) / previous * 100`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Money, PeriodKind, PeriodWindow};

use crate::alerts::{generate_alerts, Alert, AlertThresholds};
use crate::chart::{build_balance_series, ChartSeries, ChartWindow};
use crate::error::TreasuryError;
use crate::records::{money_or_zero, PaymentMode, Side, TreasuryBook};
use crate::schedule::build_schedule;

/// Parameters for one KPI computation
///
/// Every input is explicit; the engine never reads the wall clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiParams {
    /// Period granularity for the headline figures
    pub period: PeriodKind,
    /// 0 = period containing the reference date, 1 = the one before, ...
    pub offset: u32,
    /// Date anchoring the period grid (normally "today")
    pub reference_date: NaiveDate,
    /// Number of weeks on the evolution chart
    pub chart_window: ChartWindow,
    /// Alert thresholds
    pub thresholds: AlertThresholds,
}

impl KpiParams {
    /// Week-granularity parameters with default chart window and thresholds
    pub fn weekly(reference_date: NaiveDate) -> Self {
        Self {
            period: PeriodKind::Week,
            offset: 0,
            reference_date,
            chart_window: ChartWindow::default(),
            thresholds: AlertThresholds::default(),
        }
    }
}

/// A headline value with its period-over-period trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Value for the requested period, rounded to millimes
    pub value: Money,
    /// Percentage change versus the prior period, rounded to 2 dp
    pub trend: Decimal,
    /// Whether the dashboard should render this figure as favourable
    pub positive: bool,
}

/// The full KPI bundle returned to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiBundle {
    pub income: Figure,
    pub expense: Figure,
    pub balance: Figure,
    pub expected_income: Figure,
    pub expected_expense: Figure,
    pub forecast: Figure,
    /// Unpaid client installments past their due date as of the reference date
    pub overdue: Figure,
    /// Number of installments behind the overdue figure
    pub overdue_count: u64,
    /// Weekly balance series for the evolution chart
    pub chart: ChartSeries,
    /// Number of financial records dated in the period
    pub transaction_count: u64,
    /// Settled share of client order volume, in percent
    pub recovery_rate: Decimal,
    pub alerts: Vec<Alert>,
}

/// Percentage change between two period values
pub fn compute_trend(current: Money, previous: Money) -> Decimal {
    if previous.is_zero() {
        if current.is_zero() {
            Decimal::ZERO
        } else {
            dec!(100)
        }
    } else {
        ((current.amount() - previous.amount()) / previous.amount() * dec!(100)).round_dp(2)
    }
}

/// Cash actually received during the window
pub fn income(book: &TreasuryBook, window: &PeriodWindow) -> Money {
    let orders: Money = book
        .orders
        .iter()
        .filter(|o| o.settled && window.contains(o.order_date))
        .map(|o| match o.payment_mode {
            mode if mode.is_cash_equivalent() => money_or_zero(o.total_ttc),
            PaymentMode::Mixed => money_or_zero(o.mixed_cash_portion),
            _ => Money::zero(),
        })
        .sum();

    let installments: Money = book
        .installments
        .iter()
        .filter(|i| i.side == Side::Client && i.paid && window.contains(i.due_date))
        .map(|i| money_or_zero(i.amount))
        .sum();

    let refunds: Money = book
        .credit_notes
        .iter()
        .filter(|n| n.settled && window.contains(n.note_date))
        .map(|n| money_or_zero(n.total))
        .sum();

    orders + installments + refunds
}

/// Cash actually spent during the window
pub fn expense(book: &TreasuryBook, window: &PeriodWindow) -> Money {
    let invoices: Money = book
        .supplier_invoices
        .iter()
        .filter(|f| f.settled && window.contains(f.invoice_date))
        .map(|f| match f.payment_mode {
            mode if mode.is_cash_equivalent() => money_or_zero(f.total),
            PaymentMode::Mixed => money_or_zero(f.mixed_cash_portion),
            _ => Money::zero(),
        })
        .sum();

    let installments: Money = book
        .installments
        .iter()
        .filter(|i| i.side == Side::Supplier && i.paid && window.contains(i.due_date))
        .map(|i| money_or_zero(i.amount))
        .sum();

    let payroll: Money = book
        .payroll
        .iter()
        .filter(|p| p.disbursed && window.contains(p.pay_date))
        .map(|p| money_or_zero(p.net_pay))
        .sum();

    let advances: Money = book
        .advances
        .iter()
        .filter(|a| a.accepted && window.contains(a.request_date))
        .map(|a| a.outstanding())
        .sum();

    invoices + installments + payroll + advances
}

/// Inflows promised but not yet received, dated in the window
pub fn expected_income(book: &TreasuryBook, window: &PeriodWindow) -> Money {
    let orders: Money = book
        .orders
        .iter()
        .filter(|o| {
            !o.settled
                && !o.on_installment_plan
                && o.payment_mode != PaymentMode::Installment
                && window.contains(o.order_date)
        })
        .map(|o| money_or_zero(o.total_ttc))
        .sum();

    let installments: Money = book
        .installments
        .iter()
        .filter(|i| i.side == Side::Client && !i.paid && window.contains(i.due_date))
        .map(|i| money_or_zero(i.amount))
        .sum();

    let quotes: Money = book
        .quotes
        .iter()
        .filter(|q| q.accepted && !q.converted && window.contains(q.issue_date))
        .map(|q| money_or_zero(q.total_ttc))
        .sum();

    orders + installments + quotes
}

/// Outflows committed but not yet paid, dated in the window
pub fn expected_expense(book: &TreasuryBook, window: &PeriodWindow) -> Money {
    let invoices: Money = book
        .supplier_invoices
        .iter()
        .filter(|f| !f.settled && window.contains(f.invoice_date))
        .map(|f| money_or_zero(f.total))
        .sum();

    let installments: Money = book
        .installments
        .iter()
        .filter(|i| i.side == Side::Supplier && !i.paid && window.contains(i.due_date))
        .map(|i| money_or_zero(i.amount))
        .sum();

    let payroll: Money = book
        .payroll
        .iter()
        .filter(|p| !p.disbursed && window.contains(p.pay_date))
        .map(|p| money_or_zero(p.net_pay))
        .sum();

    let advances: Money = book
        .advances
        .iter()
        .filter(|a| a.accepted && !a.disbursed && window.contains(a.request_date))
        .map(|a| money_or_zero(a.amount))
        .sum();

    invoices + installments + payroll + advances
}

/// Total and count of unpaid client installments past due as of `as_of`
///
/// Unlike the windowed figures this is a cumulative snapshot: everything
/// due strictly before the date and still unpaid counts, however old.
pub fn overdue_receivables(book: &TreasuryBook, as_of: NaiveDate) -> (Money, u64) {
    let mut total = Money::zero();
    let mut count = 0u64;
    for due in book
        .installments
        .iter()
        .filter(|i| i.side == Side::Client && !i.paid && i.due_date < as_of)
    {
        total = total + money_or_zero(due.amount);
        count += 1;
    }
    (total, count)
}

/// Number of financial records dated in the window, across all sources
pub fn transaction_count(book: &TreasuryBook, window: &PeriodWindow) -> u64 {
    let mut count = 0u64;
    count += book
        .orders
        .iter()
        .filter(|o| window.contains(o.order_date))
        .count() as u64;
    count += book
        .supplier_invoices
        .iter()
        .filter(|f| window.contains(f.invoice_date))
        .count() as u64;
    count += book
        .installments
        .iter()
        .filter(|i| window.contains(i.due_date))
        .count() as u64;
    count += book
        .payroll
        .iter()
        .filter(|p| window.contains(p.pay_date))
        .count() as u64;
    count += book
        .advances
        .iter()
        .filter(|a| window.contains(a.request_date))
        .count() as u64;
    count
}

/// Settled share of client order volume in the window, in percent
pub fn recovery_rate(book: &TreasuryBook, window: &PeriodWindow) -> Decimal {
    let issued: Money = book
        .orders
        .iter()
        .filter(|o| window.contains(o.order_date))
        .map(|o| money_or_zero(o.total_ttc))
        .sum();
    let settled: Money = book
        .orders
        .iter()
        .filter(|o| o.settled && window.contains(o.order_date))
        .map(|o| money_or_zero(o.total_ttc))
        .sum();

    if issued.is_zero() {
        Decimal::ZERO
    } else {
        (settled.amount() / issued.amount() * dec!(100)).round_dp(2)
    }
}

/// Computes the full KPI bundle for the requested period
pub fn compute_kpis(book: &TreasuryBook, params: &KpiParams) -> Result<KpiBundle, TreasuryError> {
    let current = PeriodWindow::for_offset(params.period, params.offset, params.reference_date);
    let previous =
        PeriodWindow::for_offset(params.period, params.offset + 1, params.reference_date);

    debug!(
        period = %params.period,
        offset = params.offset,
        start = %current.start,
        end = %current.end,
        "computing treasury KPIs"
    );

    let income_now = income(book, &current);
    let income_prev = income(book, &previous);
    let expense_now = expense(book, &current);
    let expense_prev = expense(book, &previous);
    let expected_income_now = expected_income(book, &current);
    let expected_income_prev = expected_income(book, &previous);
    let expected_expense_now = expected_expense(book, &current);
    let expected_expense_prev = expected_expense(book, &previous);

    let balance_now = income_now - expense_now;
    let balance_prev = income_prev - expense_prev;

    let forecast_now = balance_now + expected_income_now - expected_expense_now;
    let forecast_prev = balance_prev + expected_income_prev - expected_expense_prev;

    let income_trend = compute_trend(income_now, income_prev);
    let expected_income_trend = compute_trend(expected_income_now, expected_income_prev);
    let expected_expense_trend = compute_trend(expected_expense_now, expected_expense_prev);
    let forecast_trend = compute_trend(forecast_now, forecast_prev);

    let (overdue_now, overdue_count) = overdue_receivables(book, params.reference_date);
    let (overdue_prev, _) = overdue_receivables(book, current.start);
    let overdue_trend = compute_trend(overdue_now, overdue_prev);

    let schedule = build_schedule(book, params.reference_date, None);
    let alerts = generate_alerts(
        forecast_now,
        balance_now,
        expected_income_now,
        expected_expense_now,
        &schedule,
        &params.thresholds,
    );

    Ok(KpiBundle {
        income: Figure {
            value: income_now.round_millimes(),
            trend: income_trend,
            positive: income_trend >= Decimal::ZERO,
        },
        expense: Figure {
            value: expense_now.round_millimes(),
            trend: compute_trend(expense_now, expense_prev),
            positive: false,
        },
        balance: Figure {
            value: balance_now.round_millimes(),
            trend: compute_trend(balance_now, balance_prev),
            positive: !balance_now.is_negative(),
        },
        expected_income: Figure {
            value: expected_income_now.round_millimes(),
            trend: expected_income_trend,
            positive: expected_income_trend >= Decimal::ZERO,
        },
        expected_expense: Figure {
            value: expected_expense_now.round_millimes(),
            trend: expected_expense_trend,
            positive: expected_expense_trend >= Decimal::ZERO,
        },
        forecast: Figure {
            value: forecast_now.round_millimes(),
            trend: forecast_trend,
            positive: forecast_trend >= Decimal::ZERO,
        },
        overdue: Figure {
            value: overdue_now.round_millimes(),
            trend: overdue_trend,
            // a shrinking backlog is the favourable direction
            positive: overdue_trend <= Decimal::ZERO,
        },
        overdue_count,
        chart: build_balance_series(book, params.reference_date, params.chart_window),
        transaction_count: transaction_count(book, &current),
        recovery_rate: recovery_rate(book, &current),
        alerts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trend_both_zero() {
        assert_eq!(compute_trend(Money::zero(), Money::zero()), Decimal::ZERO);
    }

    #[test]
    fn test_trend_previous_zero_current_nonzero() {
        assert_eq!(
            compute_trend(Money::new(dec!(42)), Money::zero()),
            dec!(100)
        );
    }

    #[test]
    fn test_trend_regular_case() {
        assert_eq!(
            compute_trend(Money::new(dec!(150)), Money::new(dec!(100))),
            dec!(50.00)
        );
        assert_eq!(
            compute_trend(Money::new(dec!(75)), Money::new(dec!(100))),
            dec!(-25.00)
        );
    }

    #[test]
    fn test_trend_rounds_to_two_places() {
        let trend = compute_trend(Money::new(dec!(100)), Money::new(dec!(300)));
        assert_eq!(trend, dec!(-66.67));
    }
}
