//! Commercial document aggregate
//!
//! A document is an invoice, quote or order together with its line items.
//! The four derived monetary fields are owned by the total calculator in
//! [`crate::totals`]; nothing else may write them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, DocumentId, ItemId, LineId, Money, Rate};

use crate::totals::DocumentTotals;

/// What kind of commercial document this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Client invoice
    Invoice,
    /// Quote awaiting acceptance
    Quote,
    /// Client order
    Order,
    /// Supplier purchase invoice
    SupplierInvoice,
}

/// Fiscal nature of the document
///
/// Credit notes carry no surcharge and no stamp duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentNature {
    Standard,
    CreditNote,
}

/// A line item on a document
///
/// The unit price may override the catalog price of the referenced item;
/// when absent the calculator resolves it through the price catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Line identifier
    pub id: LineId,
    /// Referenced priced item
    pub item_id: ItemId,
    /// Quantity ordered
    pub quantity: Decimal,
    /// Optional unit price override
    pub unit_price: Option<Money>,
    /// Discount percentage (0-100)
    pub discount_pct: Decimal,
    /// Soft-delete flag; deleted lines do not contribute to totals
    pub deleted: bool,
}

impl Line {
    /// Creates a new line for an item
    pub fn new(item_id: ItemId, quantity: Decimal) -> Self {
        Self {
            id: LineId::new_v7(),
            item_id,
            quantity,
            unit_price: None,
            discount_pct: Decimal::ZERO,
            deleted: false,
        }
    }

    /// Overrides the catalog unit price
    pub fn with_unit_price(mut self, price: Money) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// Applies a percentage discount
    pub fn with_discount(mut self, discount_pct: Decimal) -> Self {
        self.discount_pct = discount_pct;
        self
    }

    /// Net amount for this line given a resolved unit price (exact, unrounded)
    ///
    /// `quantity x unit_price x (1 - discount/100)`
    pub fn net_amount(&self, unit_price: Money) -> Money {
        let discount_factor = Decimal::ONE - self.discount_pct / Decimal::ONE_HUNDRED;
        unit_price.multiply(self.quantity).multiply(discount_factor)
    }
}

/// A commercial document with its lines and derived totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Human-readable number (e.g. "FAC-2026-0042")
    pub number: String,
    /// Document kind
    pub kind: DocumentKind,
    /// Fiscal nature
    pub nature: DocumentNature,
    /// Client (absent on supplier documents)
    pub client_id: Option<ClientId>,
    /// VAT rate applied to the document
    pub tax_rate: Rate,
    /// Configured stamp duty (waived on credit notes by the calculator)
    pub stamp_duty: Money,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Line items
    pub lines: Vec<Line>,
    /// Derived totals; None until the calculator has run
    pub totals: Option<DocumentTotals>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Creates a new empty document
    pub fn new(
        number: impl Into<String>,
        kind: DocumentKind,
        nature: DocumentNature,
        tax_rate: Rate,
        issue_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new_v7(),
            number: number.into(),
            kind,
            nature,
            client_id: None,
            tax_rate,
            stamp_duty: Money::zero(),
            issue_date,
            lines: Vec::new(),
            totals: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the client
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the configured stamp duty
    pub fn with_stamp_duty(mut self, stamp: Money) -> Self {
        self.stamp_duty = stamp;
        self
    }

    /// Adds a line; the caller must re-run the total calculator afterwards
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
        self.totals = None;
        self.updated_at = Utc::now();
    }

    /// Soft-deletes a line by id, invalidating the stored totals
    pub fn remove_line(&mut self, line_id: LineId) -> bool {
        let mut found = false;
        for line in &mut self.lines {
            if line.id == line_id && !line.deleted {
                line.deleted = true;
                found = true;
            }
        }
        if found {
            self.totals = None;
            self.updated_at = Utc::now();
        }
        found
    }

    /// Lines that contribute to totals
    pub fn active_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|l| !l.deleted)
    }

    /// Stores freshly computed totals on the document
    pub fn apply_totals(&mut self, totals: DocumentTotals) {
        self.totals = Some(totals);
        self.updated_at = Utc::now();
    }

    /// Tax-inclusive total, if computed
    pub fn amount_ttc(&self) -> Option<Money> {
        self.totals.as_ref().map(|t| t.ttc)
    }
}
