//! Storage-specific error types for SQLite operations.
//!
//! This module wraps Diesel and r2d2 errors and converts them to the
//! database-agnostic error types defined in `treasury_core`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use treasury_core::errors::{DatabaseError, Error};
use treasury_core::ledger::LedgerError;

/// Name of the CHECK constraint keeping `users.balance` non-negative.
pub const BALANCE_CHECK: &str = "users_balance_non_negative";

/// Name of the CHECK constraint bounding `holdings.remaining_amount`.
pub const REMAINING_AMOUNT_CHECK: &str = "holdings_remaining_amount_bounds";

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `treasury_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A domain error raised inside a write job. Passed through unchanged.
    #[error(transparent)]
    Core(Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(DieselError::DatabaseError(kind, info))
                if is_check_violation(&kind, info.message()) =>
            {
                check_violation(info.message())
            }
            StorageError::QueryFailed(DieselError::RollbackTransaction) => Error::Database(
                DatabaseError::TransactionFailed("transaction rolled back".to_string()),
            ),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Core(e) => e,
        }
    }
}

fn is_check_violation(kind: &DatabaseErrorKind, message: &str) -> bool {
    matches!(kind, DatabaseErrorKind::CheckViolation) || message.contains("CHECK constraint failed")
}

/// Map a CHECK failure to the ledger error the violated rule stands for.
fn check_violation(message: &str) -> Error {
    if message.contains(BALANCE_CHECK) {
        LedgerError::InsufficientBalance(format!("balance would become negative ({})", message))
            .into()
    } else if message.contains(REMAINING_AMOUNT_CHECK) {
        LedgerError::InvalidAmount(format!(
            "remaining amount out of range ({})",
            message
        ))
        .into()
    } else {
        Error::Database(DatabaseError::QueryFailed(message.to_string()))
    }
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// This provides a `.into_core()` method on any `Result<T, diesel::result::Error>`
/// which handles the conversion through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> treasury_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> treasury_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> treasury_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
