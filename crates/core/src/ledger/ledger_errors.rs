use thiserror::Error;

/// Errors raised by ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{0}")]
    InvalidAmount(String),

    #[error("{0}")]
    InvalidYield(String),

    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("{0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    DataIntegrity(String),
}
