//! Yield curve provider trait definition.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::YieldCurveEntry;

/// Source of daily par yield curve data, one calendar year per request.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use treasury_market_data::{MarketDataError, YieldCurveEntry, YieldCurveProvider};
///
/// struct FixedProvider(Vec<YieldCurveEntry>);
///
/// #[async_trait]
/// impl YieldCurveProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_year(
///         &self,
///         _year: i32,
///         _timeout: Duration,
///     ) -> Result<Vec<YieldCurveEntry>, MarketDataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait YieldCurveProvider: Send + Sync {
    /// Constant identifier used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch every published entry of `year`.
    ///
    /// Entries come back in feed order. An empty vector means the year has no
    /// trading days published yet. The request must give up after `timeout`.
    async fn fetch_year(
        &self,
        year: i32,
        timeout: Duration,
    ) -> Result<Vec<YieldCurveEntry>, MarketDataError>;
}
