//! SQLite storage implementation for the treasury ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `treasury-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations (schema and demo users)
//! - The single writer actor that turns each ledger call into one immediate transaction
//! - Repository implementations for users, holdings, transactions and ledger writes
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!     storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod holdings;
pub mod ledger;
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use holdings::HoldingRepository;
pub use ledger::LedgerRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

// Re-export from treasury-core for convenience
pub use treasury_core::errors::{DatabaseError, Error, Result};
