//! Cash schedule builder
//!
//! Projects every future-dated, not-yet-settled financial event into one
//! chronological timeline. Positive amounts are inflows, negative amounts
//! outflows. The schedule carries no derived totals; the KPI engine owns
//! the summarized expected figures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::records::{Side, TreasuryBook};

/// Where a schedule event originates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    ClientOrder,
    ClientInstallment,
    SupplierInstallment,
    Payroll,
}

/// One upcoming cash movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub date: NaiveDate,
    pub description: String,
    /// Signed amount: positive inflow, negative outflow
    pub amount: Money,
    pub category: EventCategory,
}

/// Collects future events from `reference` onwards, sorted by date
///
/// `end` optionally bounds the horizon (inclusive).
pub fn build_schedule(
    book: &TreasuryBook,
    reference: NaiveDate,
    end: Option<NaiveDate>,
) -> Vec<ScheduleEvent> {
    let in_horizon =
        |date: NaiveDate| date >= reference && end.map_or(true, |bound| date <= bound);

    let mut events = Vec::new();

    for order in book.orders.iter().filter(|o| !o.settled) {
        if in_horizon(order.order_date) {
            events.push(ScheduleEvent {
                date: order.order_date,
                description: format!("Receipt from {}", order.client_name),
                amount: Money::new(order.total_ttc.unwrap_or_default()),
                category: EventCategory::ClientOrder,
            });
        }
    }

    for due in book.installments.iter().filter(|i| !i.paid) {
        if !in_horizon(due.due_date) {
            continue;
        }
        let amount = Money::new(due.amount.unwrap_or_default());
        let (amount, description, category) = match due.side {
            Side::Client => (
                amount,
                format!("Client installment {}", due.counterparty),
                EventCategory::ClientInstallment,
            ),
            Side::Supplier => (
                -amount,
                format!("Supplier installment {}", due.counterparty),
                EventCategory::SupplierInstallment,
            ),
        };
        events.push(ScheduleEvent {
            date: due.due_date,
            description,
            amount,
            category,
        });
    }

    for slip in book.payroll.iter().filter(|p| !p.disbursed) {
        if in_horizon(slip.pay_date) {
            events.push(ScheduleEvent {
                date: slip.pay_date,
                description: format!("Payroll {}", slip.employee_name),
                amount: -Money::new(slip.net_pay.unwrap_or_default()),
                category: EventCategory::Payroll,
            });
        }
    }

    events.sort_by_key(|e| e.date);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{InstallmentDue, OrderRecord, PayrollEntry, PaymentMode};
    use core_kernel::{DocumentId, InstallmentId, PayrollId};
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_book() -> TreasuryBook {
        let mut book = TreasuryBook::new();
        book.orders.push(OrderRecord {
            id: DocumentId::new(),
            client_name: "Amine".into(),
            order_date: d(2026, 9, 20),
            payment_mode: PaymentMode::Cash,
            total_ttc: Some(dec!(1500)),
            mixed_cash_portion: None,
            settled: false,
            on_installment_plan: false,
        });
        book.installments.push(InstallmentDue {
            id: InstallmentId::new(),
            side: Side::Supplier,
            counterparty: "SteelCo".into(),
            due_date: d(2026, 9, 5),
            amount: Some(dec!(800)),
            paid: false,
        });
        book.installments.push(InstallmentDue {
            id: InstallmentId::new(),
            side: Side::Client,
            counterparty: "Amine".into(),
            due_date: d(2026, 10, 5),
            amount: Some(dec!(500)),
            paid: false,
        });
        book.payroll.push(PayrollEntry {
            id: PayrollId::new(),
            employee_name: "Rim".into(),
            pay_date: d(2026, 9, 30),
            net_pay: Some(dec!(1200)),
            disbursed: false,
        });
        book
    }

    #[test]
    fn test_schedule_sorted_and_signed() {
        let events = build_schedule(&sample_book(), d(2026, 9, 1), None);

        assert_eq!(events.len(), 4);
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));

        assert_eq!(events[0].category, EventCategory::SupplierInstallment);
        assert!(events[0].amount.is_negative());

        let order = events
            .iter()
            .find(|e| e.category == EventCategory::ClientOrder)
            .unwrap();
        assert!(order.amount.is_positive());
    }

    #[test]
    fn test_past_and_settled_events_excluded() {
        let mut book = sample_book();
        book.orders[0].settled = true;
        book.installments[0].paid = true;

        let events = build_schedule(&book, d(2026, 9, 1), None);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_end_bound_is_inclusive() {
        let events = build_schedule(&sample_book(), d(2026, 9, 1), Some(d(2026, 9, 30)));
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.date <= d(2026, 9, 30)));
    }

    #[test]
    fn test_sparse_amounts_are_zero() {
        let mut book = sample_book();
        book.payroll[0].net_pay = None;

        let events = build_schedule(&book, d(2026, 9, 1), None);
        let payroll = events
            .iter()
            .find(|e| e.category == EventCategory::Payroll)
            .unwrap();
        assert!(payroll.amount.is_zero());
    }
}
