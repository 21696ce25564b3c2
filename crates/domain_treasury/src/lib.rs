//! Treasury Domain - cash KPIs, evolution chart, schedule and alerts
//!
//! Pure read-model over the company's financial records. Given a
//! [`records::TreasuryBook`] snapshot and an explicit reference date, this
//! crate computes:
//!
//! - the six headline figures with period-over-period trends ([`kpi`])
//! - the weekly balance evolution series ([`chart`])
//! - the forward cash schedule ([`schedule`])
//! - threshold-driven alerts ([`alerts`])
//!
//! Nothing here touches a clock or a database; callers supply the data and
//! the date, which keeps every computation reproducible.

pub mod alerts;
pub mod chart;
pub mod error;
pub mod kpi;
pub mod records;
pub mod schedule;

pub use alerts::{generate_alerts, Alert, AlertSeverity, AlertThresholds};
pub use chart::{build_balance_series, ChartPoint, ChartSeries, ChartWindow};
pub use error::TreasuryError;
pub use kpi::{
    compute_kpis, compute_trend, expected_expense, expected_income, expense, income,
    overdue_receivables, recovery_rate, transaction_count, Figure, KpiBundle, KpiParams,
};
pub use records::{
    AdvanceEntry, CreditNoteRecord, InstallmentDue, OrderRecord, PaymentMode, PayrollEntry,
    QuoteEntry, Side, SupplierInvoiceRecord, TreasuryBook,
};
pub use schedule::{build_schedule, EventCategory, ScheduleEvent};
