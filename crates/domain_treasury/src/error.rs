//! Treasury domain errors
//!
//! Sparse data never raises here; only structurally invalid parameters do.

use thiserror::Error;

/// Errors that can occur in the treasury domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreasuryError {
    /// The requested period parameters make no sense
    #[error("Invalid period parameters: {0}")]
    InvalidPeriod(String),

    /// Unknown chart window token
    #[error("Unknown chart window: {0}")]
    UnknownChartWindow(String),
}
