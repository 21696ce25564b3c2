//! Installment domain errors

use thiserror::Error;

/// Errors that can occur in the installments domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstallmentError {
    /// Installment count outside the accepted 1-24 range
    #[error("Invalid installment count {0} (must be 1-24)")]
    InvalidCount(u32),

    /// Spacing period must be at least one day
    #[error("Invalid period of {0} days (must be >= 1)")]
    InvalidPeriod(u32),

    /// The payable total is negative
    #[error("Negative plan total: {0}")]
    NegativeTotal(String),

    /// Installment not found in the plan
    #[error("Installment not found: {0}")]
    InstallmentNotFound(String),

    /// Plan not found
    #[error("Plan not found: {0}")]
    PlanNotFound(String),
}
