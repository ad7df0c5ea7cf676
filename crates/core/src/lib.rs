//! Ledger Core - domain entities, services, and traits.
//!
//! This crate contains the transaction ledger model and the balance engine.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod balances;
pub mod errors;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
