//! Functional core for costwatch.
//!
//! Pure domain types, validation and aggregation, plus the repository
//! traits the server crate implements. Nothing in here performs I/O.

pub mod costs;
pub mod reports;
pub mod serde;
pub mod storage;
