//! Treasury repository - loads the financial records snapshot
//!
//! The treasury domain works on an in-memory [`TreasuryBook`]; this
//! repository materializes one from the source tables. Installment dues
//! come from the plan tables, tagged with the plan's side.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use core_kernel::{AdvanceId, DocumentId, InstallmentId, PayrollId, QuoteId};
use domain_treasury::{
    AdvanceEntry, CreditNoteRecord, InstallmentDue, OrderRecord, PaymentMode, PayrollEntry,
    QuoteEntry, Side, SupplierInvoiceRecord, TreasuryBook,
};

use crate::error::DatabaseError;

/// Repository assembling the treasury read model
#[derive(Debug, Clone)]
pub struct TreasuryRepository {
    pool: PgPool,
}

fn parse_payment_mode(raw: &str) -> Result<PaymentMode, DatabaseError> {
    match raw {
        "cash" => Ok(PaymentMode::Cash),
        "transfer" => Ok(PaymentMode::Transfer),
        "cheque" => Ok(PaymentMode::Cheque),
        "card" => Ok(PaymentMode::Card),
        "installment" => Ok(PaymentMode::Installment),
        "mixed" => Ok(PaymentMode::Mixed),
        other => Err(DatabaseError::InvalidStoredValue(format!(
            "unknown payment mode '{other}'"
        ))),
    }
}

fn parse_side(raw: &str) -> Result<Side, DatabaseError> {
    match raw {
        "client" => Ok(Side::Client),
        "supplier" => Ok(Side::Supplier),
        other => Err(DatabaseError::InvalidStoredValue(format!(
            "unknown plan side '{other}'"
        ))),
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    client_name: String,
    order_date: NaiveDate,
    payment_mode: String,
    total_ttc: Option<Decimal>,
    mixed_cash_portion: Option<Decimal>,
    settled: bool,
    on_installment_plan: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct SupplierInvoiceRow {
    invoice_id: Uuid,
    supplier_name: String,
    invoice_date: NaiveDate,
    payment_mode: String,
    total: Option<Decimal>,
    mixed_cash_portion: Option<Decimal>,
    settled: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct InstallmentDueRow {
    installment_id: Uuid,
    side: String,
    counterparty: Option<String>,
    due_date: NaiveDate,
    amount: Decimal,
    status: String,
}

#[derive(Debug, sqlx::FromRow)]
struct PayrollRow {
    payroll_id: Uuid,
    employee_name: String,
    pay_date: NaiveDate,
    net_pay: Option<Decimal>,
    disbursed: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct AdvanceRow {
    advance_id: Uuid,
    employee_name: String,
    request_date: NaiveDate,
    amount: Option<Decimal>,
    reimbursed: Option<Decimal>,
    accepted: bool,
    disbursed: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    quote_id: Uuid,
    client_name: String,
    issue_date: NaiveDate,
    total_ttc: Option<Decimal>,
    accepted: bool,
    converted: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct CreditNoteRow {
    note_id: Uuid,
    supplier_name: String,
    note_date: NaiveDate,
    total: Option<Decimal>,
    settled: bool,
}

impl TreasuryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads a complete snapshot of the financial records
    #[instrument(skip(self))]
    pub async fn load_book(&self) -> Result<TreasuryBook, DatabaseError> {
        let orders: Vec<OrderRow> = sqlx::query_as("SELECT * FROM client_orders")
            .fetch_all(&self.pool)
            .await?;

        let invoices: Vec<SupplierInvoiceRow> = sqlx::query_as("SELECT * FROM supplier_invoices")
            .fetch_all(&self.pool)
            .await?;

        let dues: Vec<InstallmentDueRow> = sqlx::query_as(
            r#"
            SELECT i.installment_id, p.side, p.counterparty_name AS counterparty,
                   i.due_date, i.amount, i.status
            FROM installments i
            JOIN installment_plans p ON p.plan_id = i.plan_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let payroll: Vec<PayrollRow> = sqlx::query_as("SELECT * FROM payroll_entries")
            .fetch_all(&self.pool)
            .await?;

        let advances: Vec<AdvanceRow> = sqlx::query_as("SELECT * FROM salary_advances")
            .fetch_all(&self.pool)
            .await?;

        let quotes: Vec<QuoteRow> = sqlx::query_as("SELECT * FROM client_quotes")
            .fetch_all(&self.pool)
            .await?;

        let credit_notes: Vec<CreditNoteRow> =
            sqlx::query_as("SELECT * FROM supplier_credit_notes")
                .fetch_all(&self.pool)
                .await?;

        let mut book = TreasuryBook::new();

        for row in orders {
            book.orders.push(OrderRecord {
                id: DocumentId::from_uuid(row.order_id),
                client_name: row.client_name,
                order_date: row.order_date,
                payment_mode: parse_payment_mode(&row.payment_mode)?,
                total_ttc: row.total_ttc,
                mixed_cash_portion: row.mixed_cash_portion,
                settled: row.settled,
                on_installment_plan: row.on_installment_plan,
            });
        }

        for row in invoices {
            book.supplier_invoices.push(SupplierInvoiceRecord {
                id: DocumentId::from_uuid(row.invoice_id),
                supplier_name: row.supplier_name,
                invoice_date: row.invoice_date,
                payment_mode: parse_payment_mode(&row.payment_mode)?,
                total: row.total,
                mixed_cash_portion: row.mixed_cash_portion,
                settled: row.settled,
            });
        }

        for row in dues {
            book.installments.push(InstallmentDue {
                id: InstallmentId::from_uuid(row.installment_id),
                side: parse_side(&row.side)?,
                counterparty: row.counterparty.unwrap_or_default(),
                due_date: row.due_date,
                amount: Some(row.amount),
                paid: row.status == "PAID",
            });
        }

        for row in payroll {
            book.payroll.push(PayrollEntry {
                id: PayrollId::from_uuid(row.payroll_id),
                employee_name: row.employee_name,
                pay_date: row.pay_date,
                net_pay: row.net_pay,
                disbursed: row.disbursed,
            });
        }

        for row in advances {
            book.advances.push(AdvanceEntry {
                id: AdvanceId::from_uuid(row.advance_id),
                employee_name: row.employee_name,
                request_date: row.request_date,
                amount: row.amount,
                reimbursed: row.reimbursed,
                accepted: row.accepted,
                disbursed: row.disbursed,
            });
        }

        for row in quotes {
            book.quotes.push(QuoteEntry {
                id: QuoteId::from_uuid(row.quote_id),
                client_name: row.client_name,
                issue_date: row.issue_date,
                total_ttc: row.total_ttc,
                accepted: row.accepted,
                converted: row.converted,
            });
        }

        for row in credit_notes {
            book.credit_notes.push(CreditNoteRecord {
                id: DocumentId::from_uuid(row.note_id),
                supplier_name: row.supplier_name,
                note_date: row.note_date,
                total: row.total,
                settled: row.settled,
            });
        }

        Ok(book)
    }
}
