//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the financial engine, built on SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: domain crates stay free of SQL,
//! and each repository here maps rows into the corresponding domain types.
//! Write paths with multi-row consistency requirements (document totals,
//! plan generation, the installment status cascade) are expressed as single
//! transactions.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, DocumentRepository};
//!
//! let pool = create_pool_from_url("postgres://localhost/business").await?;
//! let repo = DocumentRepository::new(pool);
//! let totals = repo.recompute_and_store_totals(document_id).await?;
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{DocumentRepository, InstallmentRepository, TreasuryRepository};
