//! SQLite storage implementation for the investment ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `ledger-core` and contains:
//! - Per-call connection management and schema bootstrap
//! - Diesel migrations plus the in-place upgrade of older table layouts
//! - Repository implementations for the ledger
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//!
//! ```text
//! core (domain)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!   SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod transactions;

// Re-export database utilities
pub use db::{ensure_schema, init, run_migrations, Database, DbConnection};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from ledger-core for convenience
pub use ledger_core::errors::{DatabaseError, Error, Result};
