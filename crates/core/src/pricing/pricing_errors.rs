use thiserror::Error;

/// Errors raised by the pricing functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("invalid term: {0} (valid terms: 1M, 3M, 6M, 1Y, 2Y, 5Y, 10Y, 30Y)")]
    InvalidTerm(String),

    #[error("{0}")]
    InvalidSecurityType(String),

    #[error("{0}")]
    InvalidInput(String),
}
