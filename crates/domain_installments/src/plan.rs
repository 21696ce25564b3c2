//! Installment plan aggregate
//!
//! A plan owns its installments exclusively: installments are created in a
//! batch by the generator, mutated only through status updates, and deleted
//! only with their plan.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{DocumentId, InstallmentId, Money, PlanId};

/// Aggregate payment status of a plan, derived from its installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

/// Which side of the ledger a plan settles
///
/// Client plans collect receivables; supplier plans pay out purchase
/// invoices. The treasury engine routes each side's dues accordingly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSide {
    #[default]
    Client,
    Supplier,
}

/// Payment status of a single installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    Unpaid,
    Paid,
}

/// One scheduled partial payment within a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// Unique identifier
    pub id: InstallmentId,
    /// Owning plan
    pub plan_id: PlanId,
    /// Zero-based position in the schedule
    pub sequence: u32,
    /// Due date
    pub due_date: NaiveDate,
    /// Amount payable
    pub amount: Money,
    /// Payment status
    pub status: InstallmentStatus,
    /// Opaque bank reference (pass-through metadata)
    pub bank_reference: Option<String>,
    /// Opaque acceptance text (pass-through metadata)
    pub acceptance: Option<String>,
}

/// An installment payment schedule attached to a payable document
///
/// The total is copied from the document's TTC at creation time (or supplied
/// as an explicit override); it is not a live reference. For plans whose
/// originating document type varies, the counterparty name and tax id are
/// denormalized onto the plan itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentPlan {
    /// Unique identifier
    pub id: PlanId,
    /// Payable document this plan settles, if any
    pub document_id: Option<DocumentId>,
    /// Ledger side the plan settles
    pub side: PlanSide,
    /// Denormalized counterparty name
    pub counterparty_name: Option<String>,
    /// Denormalized counterparty tax id
    pub counterparty_tax_id: Option<String>,
    /// Total payable amount
    pub total: Money,
    /// Number of installments (1-24)
    pub count: u32,
    /// Due date of the first installment
    pub first_due: NaiveDate,
    /// Days between consecutive due dates
    pub period_days: u32,
    /// Aggregate status, derived from the installments
    pub status: PlanStatus,
    /// Generated installments (empty until generation runs)
    pub installments: Vec<Installment>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Default spacing between installments, in days
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// Upper bound on the installment count
pub const MAX_INSTALLMENTS: u32 = 24;

impl InstallmentPlan {
    /// Creates a new plan; installments are generated separately
    pub fn new(total: Money, count: u32, first_due: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: PlanId::new_v7(),
            document_id: None,
            side: PlanSide::Client,
            counterparty_name: None,
            counterparty_tax_id: None,
            total,
            count,
            first_due,
            period_days: DEFAULT_PERIOD_DAYS,
            status: PlanStatus::Unpaid,
            installments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches the payable document
    pub fn for_document(mut self, document_id: DocumentId) -> Self {
        self.document_id = Some(document_id);
        self
    }

    /// Sets the denormalized counterparty details
    pub fn with_counterparty(
        mut self,
        name: impl Into<String>,
        tax_id: Option<String>,
    ) -> Self {
        self.counterparty_name = Some(name.into());
        self.counterparty_tax_id = tax_id;
        self
    }

    /// Sets the ledger side; new plans default to the client side
    pub fn with_side(mut self, side: PlanSide) -> Self {
        self.side = side;
        self
    }

    /// Overrides the spacing period
    pub fn with_period_days(mut self, days: u32) -> Self {
        self.period_days = days;
        self
    }

    /// True once installments have been generated
    pub fn has_installments(&self) -> bool {
        !self.installments.is_empty()
    }

    /// Sum of the installment amounts
    pub fn installment_total(&self) -> Money {
        self.installments.iter().map(|i| i.amount).sum()
    }

    /// Amount still unpaid across the schedule
    pub fn outstanding(&self) -> Money {
        self.installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Unpaid)
            .map(|i| i.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_plan_defaults() {
        let plan = InstallmentPlan::new(Money::new(dec!(300)), 3, d(2026, 9, 1));
        assert_eq!(plan.status, PlanStatus::Unpaid);
        assert_eq!(plan.side, PlanSide::Client);
        assert_eq!(plan.period_days, DEFAULT_PERIOD_DAYS);
        assert!(!plan.has_installments());
    }

    #[test]
    fn test_supplier_side_marks_plan_as_payable() {
        let plan = InstallmentPlan::new(Money::new(dec!(500)), 2, d(2026, 9, 1))
            .with_side(PlanSide::Supplier)
            .with_counterparty("Fournitures du Sud", None);
        assert_eq!(plan.side, PlanSide::Supplier);
        assert_eq!(
            serde_json::to_value(plan.side).unwrap(),
            serde_json::json!("supplier")
        );
    }

    #[test]
    fn test_counterparty_denormalization() {
        let plan = InstallmentPlan::new(Money::new(dec!(100)), 2, d(2026, 9, 1))
            .with_counterparty("Ste El Bouniane", Some("1234567/A/M/000".into()));
        assert_eq!(plan.counterparty_name.as_deref(), Some("Ste El Bouniane"));
        assert!(plan.document_id.is_none());
    }

    #[test]
    fn test_outstanding_counts_unpaid_only() {
        let mut plan = InstallmentPlan::new(Money::new(dec!(200)), 2, d(2026, 9, 1));
        plan.installments = vec![
            Installment {
                id: InstallmentId::new(),
                plan_id: plan.id,
                sequence: 0,
                due_date: d(2026, 9, 1),
                amount: Money::new(dec!(100)),
                status: InstallmentStatus::Paid,
                bank_reference: None,
                acceptance: None,
            },
            Installment {
                id: InstallmentId::new(),
                plan_id: plan.id,
                sequence: 1,
                due_date: d(2026, 10, 1),
                amount: Money::new(dec!(100)),
                status: InstallmentStatus::Unpaid,
                bank_reference: None,
                acceptance: None,
            },
        ];

        assert_eq!(plan.outstanding().amount(), dec!(100));
        assert_eq!(plan.installment_total().amount(), dec!(200));
    }
}
