use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::yields_model::{HistoricalYieldSeries, YieldSnapshot};
use crate::errors::Result;
use crate::pricing::Term;

/// Trait defining the contract for yield curve reads.
#[async_trait]
pub trait YieldServiceTrait: Send + Sync {
    /// Most recent published curve. Cached for the configured TTL.
    async fn get_latest_yields(&self) -> Result<Arc<YieldSnapshot>>;

    /// Historical 10Y/5Y/2Y yields for a period code such as `"3M"`.
    ///
    /// A period's series is built once and kept for the life of the process.
    async fn get_historical_yields(&self, period: &str) -> Result<Arc<HistoricalYieldSeries>>;

    /// Latest published rate for `term`, in percent.
    async fn get_current_rate(&self, term: Term) -> Result<Decimal>;
}
