//! Treasury Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the treasury trading demo:
//! bill/note/bond pricing, the cash and holdings ledger, and the cached
//! yield curve service. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod holdings;
pub mod ledger;
pub mod pricing;
pub mod transactions;
pub mod users;
pub mod utils;
pub mod yields;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
