//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about and lean on defaults
//! for everything else.

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{DocumentId, ItemId, Money, Rate};
use domain_documents::{
    Document, DocumentKind, DocumentNature, InMemoryCatalog, Line,
};
use domain_installments::{InstallmentPlan, PlanSide};
use domain_treasury::{
    InstallmentDue, OrderRecord, PaymentMode, PayrollEntry, Side, SupplierInvoiceRecord,
    TreasuryBook,
};

use crate::fixtures::{DateFixtures, MoneyFixtures, RateFixtures};

/// Builder for a document together with a catalog that prices its lines
pub struct DocumentBuilder {
    kind: DocumentKind,
    nature: DocumentNature,
    tax_rate: Rate,
    stamp_duty: Money,
    issue_date: NaiveDate,
    lines: Vec<(Decimal, Money, Decimal)>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            kind: DocumentKind::Invoice,
            nature: DocumentNature::Standard,
            tax_rate: RateFixtures::vat_standard(),
            stamp_duty: MoneyFixtures::stamp_duty(),
            issue_date: DateFixtures::issue_date(),
            lines: Vec::new(),
        }
    }

    pub fn credit_note(mut self) -> Self {
        self.nature = DocumentNature::CreditNote;
        self
    }

    pub fn kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn tax_rate(mut self, rate: Rate) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn stamp_duty(mut self, stamp: Money) -> Self {
        self.stamp_duty = stamp;
        self
    }

    /// Adds a line priced from the catalog
    pub fn line(mut self, quantity: Decimal, unit_price: Money) -> Self {
        self.lines.push((quantity, unit_price, dec!(0)));
        self
    }

    /// Adds a line with a discount percentage
    pub fn discounted_line(
        mut self,
        quantity: Decimal,
        unit_price: Money,
        discount_pct: Decimal,
    ) -> Self {
        self.lines.push((quantity, unit_price, discount_pct));
        self
    }

    /// Builds the document and the catalog holding its item prices
    pub fn build(self) -> (Document, InMemoryCatalog) {
        let number = format!("FAC-{}", (1000..9999).fake::<u32>());
        let mut document =
            Document::new(number, self.kind, self.nature, self.tax_rate, self.issue_date)
                .with_stamp_duty(self.stamp_duty);

        let mut catalog = InMemoryCatalog::new();
        for (quantity, unit_price, discount_pct) in self.lines {
            let item_id = ItemId::new();
            catalog.insert(item_id, unit_price);
            document.add_line(Line::new(item_id, quantity).with_discount(discount_pct));
        }

        (document, catalog)
    }
}

/// Builder for installment plans
pub struct PlanBuilder {
    document_id: Option<DocumentId>,
    side: PlanSide,
    counterparty_name: Option<String>,
    total: Money,
    count: u32,
    first_due: NaiveDate,
    period_days: Option<u32>,
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self {
            document_id: None,
            side: PlanSide::Client,
            counterparty_name: Some(CompanyName().fake()),
            total: MoneyFixtures::ttc_example(),
            count: 3,
            first_due: DateFixtures::first_due(),
            period_days: None,
        }
    }

    pub fn total(mut self, total: Money) -> Self {
        self.total = total;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn first_due(mut self, first_due: NaiveDate) -> Self {
        self.first_due = first_due;
        self
    }

    pub fn period_days(mut self, days: u32) -> Self {
        self.period_days = Some(days);
        self
    }

    pub fn for_document(mut self, document_id: DocumentId) -> Self {
        self.document_id = Some(document_id);
        self
    }

    pub fn supplier_side(mut self) -> Self {
        self.side = PlanSide::Supplier;
        self
    }

    pub fn build(self) -> InstallmentPlan {
        let mut plan =
            InstallmentPlan::new(self.total, self.count, self.first_due).with_side(self.side);
        if let Some(document_id) = self.document_id {
            plan = plan.for_document(document_id);
        }
        if let Some(name) = self.counterparty_name {
            plan = plan.with_counterparty(name, None);
        }
        if let Some(days) = self.period_days {
            plan = plan.with_period_days(days);
        }
        plan
    }
}

/// Builder for treasury book snapshots
pub struct TreasuryBookBuilder {
    book: TreasuryBook,
}

impl Default for TreasuryBookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreasuryBookBuilder {
    pub fn new() -> Self {
        Self {
            book: TreasuryBook::new(),
        }
    }

    pub fn settled_order(mut self, date: NaiveDate, total: Decimal) -> Self {
        self.book.orders.push(OrderRecord {
            id: DocumentId::new(),
            client_name: CompanyName().fake(),
            order_date: date,
            payment_mode: PaymentMode::Cash,
            total_ttc: Some(total),
            mixed_cash_portion: None,
            settled: true,
            on_installment_plan: false,
        });
        self
    }

    pub fn pending_order(mut self, date: NaiveDate, total: Decimal) -> Self {
        self.book.orders.push(OrderRecord {
            id: DocumentId::new(),
            client_name: CompanyName().fake(),
            order_date: date,
            payment_mode: PaymentMode::Cash,
            total_ttc: Some(total),
            mixed_cash_portion: None,
            settled: false,
            on_installment_plan: false,
        });
        self
    }

    pub fn settled_supplier_invoice(mut self, date: NaiveDate, total: Decimal) -> Self {
        self.book.supplier_invoices.push(SupplierInvoiceRecord {
            id: DocumentId::new(),
            supplier_name: CompanyName().fake(),
            invoice_date: date,
            payment_mode: PaymentMode::Transfer,
            total: Some(total),
            mixed_cash_portion: None,
            settled: true,
        });
        self
    }

    pub fn installment_due(
        mut self,
        side: Side,
        date: NaiveDate,
        amount: Decimal,
        paid: bool,
    ) -> Self {
        self.book.installments.push(InstallmentDue {
            id: core_kernel::InstallmentId::new(),
            side,
            counterparty: CompanyName().fake(),
            due_date: date,
            amount: Some(amount),
            paid,
        });
        self
    }

    pub fn payroll(mut self, date: NaiveDate, net_pay: Decimal, disbursed: bool) -> Self {
        self.book.payroll.push(PayrollEntry {
            id: core_kernel::PayrollId::new(),
            employee_name: Name().fake(),
            pay_date: date,
            net_pay: Some(net_pay),
            disbursed,
        });
        self
    }

    pub fn build(self) -> TreasuryBook {
        self.book
    }
}
