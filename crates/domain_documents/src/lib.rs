//! Documents Domain - invoices, quotes, orders and their totals
//!
//! This crate owns the commercial document aggregate and the total
//! calculator. The derived fields (`ht`, `surcharge`, `vat`, `ttc`) are
//! always recomputable from the lines, the tax rate and the document
//! nature; the calculator in [`totals`] is their single writer.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_documents::{Document, Line, compute_totals};
//!
//! let totals = compute_totals(&document, &catalog)?;
//! assert_eq!(totals.ttc, totals.ht + totals.surcharge + totals.vat + totals.stamp);
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod totals;

pub use catalog::{InMemoryCatalog, PriceCatalog};
pub use document::{Document, DocumentKind, DocumentNature, Line};
pub use error::DocumentError;
pub use totals::{compute_totals, recompute_totals, surcharge_rate, DocumentTotals};
