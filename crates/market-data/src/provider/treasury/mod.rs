//! U.S. Treasury daily par yield curve provider.
//!
//! Fetches the Atom/XML document published at home.treasury.gov for one
//! calendar year and decodes it into [`YieldCurveEntry`] values.

mod parser;

pub use parser::parse_yield_curve;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::MarketDataError;
use crate::models::YieldCurveEntry;
use crate::provider::YieldCurveProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "US_TREASURY";

/// Public endpoint for the XML rendition of the daily yield curve.
pub const DEFAULT_BASE_URL: &str =
    "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/pages/xml";

const USER_AGENT: &str = concat!("treasury-ledger/", env!("CARGO_PKG_VERSION"));

/// Yield curve provider backed by the Treasury XML feed.
///
/// The per-call timeout is passed in by the caller; the client itself has no
/// global deadline.
pub struct TreasuryProvider {
    client: Client,
    base_url: String,
}

impl TreasuryProvider {
    /// Create a provider pointed at the public Treasury endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider pointed at a custom endpoint (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn year_url(&self, year: i32) -> String {
        format!(
            "{}?data=daily_treasury_yield_curve&field_tdr_date_value={}",
            self.base_url.trim_end_matches('/'),
            year
        )
    }

    fn map_transport_error(err: reqwest::Error) -> MarketDataError {
        if err.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::Network(err)
        }
    }
}

impl Default for TreasuryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl YieldCurveProvider for TreasuryProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_year(
        &self,
        year: i32,
        timeout: Duration,
    ) -> Result<Vec<YieldCurveEntry>, MarketDataError> {
        let url = self.year_url(year);
        debug!("Fetching Treasury yield curve for {} from {}", year, url);

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(Self::map_transport_error)?;
        let entries = parse_yield_curve(&body).map_err(|message| MarketDataError::Parse {
            provider: PROVIDER_ID.to_string(),
            message,
        })?;

        debug!("Treasury feed for {} returned {} entries", year, entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = TreasuryProvider::new();
        assert_eq!(provider.id(), "US_TREASURY");
    }

    #[test]
    fn test_year_url() {
        let provider = TreasuryProvider::new();
        assert_eq!(
            provider.year_url(2025),
            "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/pages/xml?data=daily_treasury_yield_curve&field_tdr_date_value=2025"
        );
    }

    #[test]
    fn test_year_url_trims_trailing_slash() {
        let provider = TreasuryProvider::with_base_url("http://localhost:9000/feed/");
        assert_eq!(
            provider.year_url(2024),
            "http://localhost:9000/feed?data=daily_treasury_yield_curve&field_tdr_date_value=2024"
        );
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_fetch_current_year_live() {
        let provider = TreasuryProvider::new();
        let entries = provider
            .fetch_year(2024, Duration::from_secs(10))
            .await
            .unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| e.date().is_some()));
    }
}
