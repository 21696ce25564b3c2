//! Document DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use domain_documents::DocumentTotals;

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub ht: Decimal,
    pub surcharge: Decimal,
    pub vat: Decimal,
    pub stamp: Decimal,
    pub ttc: Decimal,
}

impl From<DocumentTotals> for TotalsResponse {
    fn from(totals: DocumentTotals) -> Self {
        Self {
            ht: totals.ht.amount(),
            surcharge: totals.surcharge.amount(),
            vat: totals.vat.amount(),
            stamp: totals.stamp.amount(),
            ttc: totals.ttc.amount(),
        }
    }
}
