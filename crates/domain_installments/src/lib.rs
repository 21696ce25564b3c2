//! Installments Domain - payment plans and their status cascade
//!
//! An installment plan covers a payable document's TTC with an ordered
//! schedule of partial payments. This crate owns:
//!
//! - the plan/installment aggregate ([`plan`])
//! - idempotent batch generation with an exact amount split ([`generator`])
//! - the two-level status cascade ([`cascade`])

pub mod cascade;
pub mod error;
pub mod generator;
pub mod plan;

pub use cascade::{derive_plan_status, set_installment_status};
pub use error::InstallmentError;
pub use generator::{generate_installments, GenerationOutcome};
pub use plan::{
    Installment, InstallmentPlan, InstallmentStatus, PlanSide, PlanStatus, DEFAULT_PERIOD_DAYS,
    MAX_INSTALLMENTS,
};
