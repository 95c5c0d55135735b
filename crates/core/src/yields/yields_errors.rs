use thiserror::Error;
use treasury_market_data::MarketDataError;

/// Errors raised by the yield service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum YieldError {
    #[error("invalid period: {0} (must be 1W, 1M, 3M, 6M, 1Y, 5Y, 10Y, or 30Y)")]
    InvalidPeriod(String),

    #[error("failed to fetch treasury data: {0}")]
    Fetch(String),

    #[error("no yield data: {0}")]
    NoData(String),
}

impl From<MarketDataError> for YieldError {
    fn from(err: MarketDataError) -> Self {
        YieldError::Fetch(err.to_string())
    }
}
