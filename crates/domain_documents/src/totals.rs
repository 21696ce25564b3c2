//! Document total calculator
//!
//! Totals are a pure function of (lines, tax rate, nature, stamp duty).
//! This module is the only writer of the derived fields; any other code
//! path mutating them is a bug.
//!
//! Calculation rules:
//! 1. `ht` = sum of net line amounts, in exact decimal arithmetic.
//! 2. Standard documents add a 1% surcharge on `ht` (half-up, millimes) and
//!    the configured stamp duty; credit notes add neither.
//! 3. `vat` = (ht + surcharge) x tax rate, half-up to millimes.
//! 4. `ttc` = ht + surcharge + vat + stamp.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Money, Rate};

use crate::catalog::PriceCatalog;
use crate::document::{Document, DocumentNature, Line};
use crate::error::DocumentError;

/// The fixed FODEC-style levy applied to standard documents
pub fn surcharge_rate() -> Rate {
    Rate::from_percentage(dec!(1))
}

/// Derived monetary fields of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Pre-tax amount (hors taxe)
    pub ht: Money,
    /// Surcharge levy (1% of HT on standard documents)
    pub surcharge: Money,
    /// VAT amount
    pub vat: Money,
    /// Stamp duty actually applied
    pub stamp: Money,
    /// Tax-inclusive total (toutes taxes comprises)
    pub ttc: Money,
}

impl DocumentTotals {
    /// All-zero totals (empty document)
    pub fn zero() -> Self {
        Self {
            ht: Money::zero(),
            surcharge: Money::zero(),
            vat: Money::zero(),
            stamp: Money::zero(),
            ttc: Money::zero(),
        }
    }
}

/// Computes the document's totals without mutating it
///
/// Fails fast: every line is validated and priced before any total is
/// produced, so an unknown item never yields a partial result.
pub fn compute_totals(
    document: &Document,
    catalog: &impl PriceCatalog,
) -> Result<DocumentTotals, DocumentError> {
    let tax_pct = document.tax_rate.as_percentage();
    if tax_pct < Decimal::ZERO || tax_pct > Decimal::ONE_HUNDRED {
        return Err(DocumentError::InvalidTaxRate(tax_pct));
    }

    let mut net_amounts = Vec::new();
    for line in document.active_lines() {
        net_amounts.push(price_line(line, catalog)?);
    }

    let ht: Money = net_amounts.into_iter().sum();

    let (surcharge, stamp) = match document.nature {
        DocumentNature::Standard => (
            surcharge_rate().apply(&ht).round_millimes(),
            document.stamp_duty,
        ),
        DocumentNature::CreditNote => (Money::zero(), Money::zero()),
    };

    let vat = document.tax_rate.apply(&(ht + surcharge)).round_millimes();
    let ttc = ht + surcharge + vat + stamp;

    Ok(DocumentTotals {
        ht,
        surcharge,
        vat,
        stamp,
        ttc,
    })
}

/// Recomputes and stores the totals on the document
pub fn recompute_totals(
    document: &mut Document,
    catalog: &impl PriceCatalog,
) -> Result<DocumentTotals, DocumentError> {
    let totals = compute_totals(document, catalog)?;
    debug!(
        document = %document.number,
        ht = %totals.ht,
        ttc = %totals.ttc,
        "recomputed document totals"
    );
    document.apply_totals(totals);
    Ok(totals)
}

fn price_line(line: &Line, catalog: &impl PriceCatalog) -> Result<Money, DocumentError> {
    if line.quantity < Decimal::ZERO {
        return Err(DocumentError::NegativeQuantity {
            line_id: line.id,
            quantity: line.quantity,
        });
    }
    if line.discount_pct < Decimal::ZERO || line.discount_pct > Decimal::ONE_HUNDRED {
        return Err(DocumentError::InvalidDiscount {
            line_id: line.id,
            discount: line.discount_pct,
        });
    }

    let unit_price = match line.unit_price {
        Some(price) => price,
        None => catalog
            .unit_price(line.item_id)
            .ok_or(DocumentError::UnknownItem {
                line_id: line.id,
                item_id: line.item_id,
            })?,
    };
    if unit_price.is_negative() {
        return Err(DocumentError::NegativeUnitPrice { line_id: line.id });
    }

    Ok(line.net_amount(unit_price))
}
