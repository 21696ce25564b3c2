//! Treasury source records
//!
//! The aggregation engine is a read-only consumer of financial facts owned
//! elsewhere: orders, supplier invoices, installments (both sides), payroll
//! and advances. Monetary fields are optional throughout; a missing amount
//! is treated as zero during aggregation, never as an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AdvanceId, DocumentId, InstallmentId, Money, PayrollId, QuoteId};

/// How a document is being paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Cash,
    Transfer,
    Cheque,
    Card,
    Installment,
    Mixed,
}

impl PaymentMode {
    /// Modes whose full amount moves as immediate cash
    ///
    /// Installment amounts flow through the installment records instead;
    /// mixed documents contribute only their cash portion.
    pub fn is_cash_equivalent(&self) -> bool {
        matches!(
            self,
            PaymentMode::Cash | PaymentMode::Transfer | PaymentMode::Cheque | PaymentMode::Card
        )
    }
}

/// Which side of the ledger an installment sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Client,
    Supplier,
}

/// A client order as the treasury sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: DocumentId,
    pub client_name: String,
    pub order_date: NaiveDate,
    pub payment_mode: PaymentMode,
    /// Tax-inclusive total; None when the document was never totalled
    pub total_ttc: Option<Decimal>,
    /// Cash portion of a mixed-mode order
    pub mixed_cash_portion: Option<Decimal>,
    /// Settled (completed) rather than pending
    pub settled: bool,
    /// An installment plan exists for this order
    pub on_installment_plan: bool,
}

/// A supplier purchase invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierInvoiceRecord {
    pub id: DocumentId,
    pub supplier_name: String,
    pub invoice_date: NaiveDate,
    pub payment_mode: PaymentMode,
    pub total: Option<Decimal>,
    pub mixed_cash_portion: Option<Decimal>,
    pub settled: bool,
}

/// One installment due, on either side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentDue {
    pub id: InstallmentId,
    pub side: Side,
    pub counterparty: String,
    pub due_date: NaiveDate,
    pub amount: Option<Decimal>,
    pub paid: bool,
}

/// A payroll slip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollEntry {
    pub id: PayrollId,
    pub employee_name: String,
    pub pay_date: NaiveDate,
    pub net_pay: Option<Decimal>,
    pub disbursed: bool,
}

/// An employee advance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceEntry {
    pub id: AdvanceId,
    pub employee_name: String,
    pub request_date: NaiveDate,
    pub amount: Option<Decimal>,
    /// Sum of reimbursements received so far
    pub reimbursed: Option<Decimal>,
    pub accepted: bool,
    pub disbursed: bool,
}

impl AdvanceEntry {
    /// Amount still owed back, never negative
    pub fn outstanding(&self) -> Money {
        (Money::new(self.amount.unwrap_or_default())
            - Money::new(self.reimbursed.unwrap_or_default()))
        .clamp_non_negative()
    }
}

/// A client quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteEntry {
    pub id: QuoteId,
    pub client_name: String,
    pub issue_date: NaiveDate,
    pub total_ttc: Option<Decimal>,
    pub accepted: bool,
    /// Already converted into an order
    pub converted: bool,
}

/// A supplier credit note (refund owed to us)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditNoteRecord {
    pub id: DocumentId,
    pub supplier_name: String,
    pub note_date: NaiveDate,
    pub total: Option<Decimal>,
    pub settled: bool,
}

/// The full set of financial facts the engine aggregates over
///
/// Loaded in one pass by the persistence layer (or assembled directly in
/// tests); the engine itself never touches storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreasuryBook {
    pub orders: Vec<OrderRecord>,
    pub supplier_invoices: Vec<SupplierInvoiceRecord>,
    pub installments: Vec<InstallmentDue>,
    pub payroll: Vec<PayrollEntry>,
    pub advances: Vec<AdvanceEntry>,
    pub quotes: Vec<QuoteEntry>,
    pub credit_notes: Vec<CreditNoteRecord>,
}

impl TreasuryBook {
    /// An empty book
    pub fn new() -> Self {
        Self::default()
    }
}

/// Treats a sparse monetary field as zero
pub(crate) fn money_or_zero(value: Option<Decimal>) -> Money {
    Money::new(value.unwrap_or_default())
}
