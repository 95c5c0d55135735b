//! SQLite implementation of the atomic ledger writes.

mod repository;

pub use repository::LedgerRepository;
