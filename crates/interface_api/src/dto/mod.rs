//! Request/response data transfer objects

pub mod documents;
pub mod installments;
pub mod treasury;
