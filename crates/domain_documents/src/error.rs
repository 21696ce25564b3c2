//! Document domain errors

use core_kernel::{ItemId, LineId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the documents domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// A line references an item the price catalog does not know
    #[error("Line {line_id} references unknown item {item_id}")]
    UnknownItem { line_id: LineId, item_id: ItemId },

    /// A line carries a negative quantity
    #[error("Line {line_id} has negative quantity {quantity}")]
    NegativeQuantity { line_id: LineId, quantity: Decimal },

    /// Discount percentage outside the 0-100 range
    #[error("Line {line_id} has invalid discount {discount}% (must be 0-100)")]
    InvalidDiscount { line_id: LineId, discount: Decimal },

    /// A negative unit price was supplied
    #[error("Line {line_id} has negative unit price")]
    NegativeUnitPrice { line_id: LineId },

    /// Tax rate outside a plausible range
    #[error("Invalid tax rate {0}% (must be 0-100)")]
    InvalidTaxRate(Decimal),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
}
