//! Core Kernel - Foundational types and utilities for the finance engine
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise millime-level decimal arithmetic
//! - Reporting-period windows with explicit reference dates
//! - Common identifiers and value objects

pub mod error;
pub mod identifiers;
pub mod money;
pub mod period;

pub use error::CoreError;
pub use identifiers::{
    AdvanceId, ClientId, DocumentId, EmployeeId, InstallmentId, ItemId, LineId, PayrollId,
    PlanId, QuoteId, SupplierId,
};
pub use money::{Money, MoneyError, Rate, MILLIME_DP};
pub use period::{week_label, week_series, PeriodError, PeriodKind, PeriodWindow};
