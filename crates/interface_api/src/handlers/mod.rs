//! Request handlers grouped by domain

pub mod documents;
pub mod health;
pub mod installments;
pub mod treasury;
