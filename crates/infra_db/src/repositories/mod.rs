//! Repository implementations for the financial aggregates
//!
//! Each repository encapsulates the SQL for one aggregate and maps between
//! database rows and domain types. Operations the domain requires to be
//! atomic (totals recompute, plan generation, the status cascade) run their
//! reads and writes inside a single transaction.

pub mod documents;
pub mod installments;
pub mod treasury;

pub use documents::DocumentRepository;
pub use installments::InstallmentRepository;
pub use treasury::TreasuryRepository;
