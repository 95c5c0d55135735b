use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use futures::future::try_join_all;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use treasury_market_data::{YieldCurveEntry, YieldCurveProvider};

use super::sampling::downsample;
use super::yields_cache::YieldCache;
use super::yields_errors::YieldError;
use super::yields_model::{
    HistoricalYieldPoint, HistoricalYieldSeries, Period, YieldSnapshot, HISTORICAL_TERMS,
};
use super::yields_traits::YieldServiceTrait;
use crate::constants::{MULTI_YEAR_FETCH_TIMEOUT, SINGLE_YEAR_FETCH_TIMEOUT};
use crate::errors::Result;
use crate::pricing::Term;
use crate::utils::time_utils::market_date_today;

type TodayFn = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Cached reads of the Treasury par yield curve.
///
/// Misses are single-flight: concurrent callers for the same key wait on one
/// refill lock, and whoever gets it second finds the cache already filled.
pub struct YieldService {
    provider: Arc<dyn YieldCurveProvider>,
    cache: Arc<YieldCache>,
    today: TodayFn,
}

impl YieldService {
    pub fn new(provider: Arc<dyn YieldCurveProvider>, cache: Arc<YieldCache>) -> Self {
        Self {
            provider,
            cache,
            today: Arc::new(market_date_today),
        }
    }

    /// Replace the clock used to pick "today" in the market time zone.
    pub fn with_today<F>(mut self, today: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        self.today = Arc::new(today);
        self
    }

    pub fn cache(&self) -> &Arc<YieldCache> {
        &self.cache
    }

    /// Build every historical period in the background.
    ///
    /// Each period runs as its own task; failures are logged and leave that
    /// period to be fetched on first request.
    pub fn warm_cache(self: &Arc<Self>) -> CacheWarmup {
        let handles = Period::ALL
            .into_iter()
            .map(|period| {
                let service = Arc::clone(self);
                let handle = tokio::spawn(async move {
                    match service.historical(period).await {
                        Ok(series) => info!(
                            "Warmed historical yields for {} ({} points)",
                            period,
                            series.data.len()
                        ),
                        Err(e) => error!("Failed to warm historical yields for {}: {}", period, e),
                    }
                });
                (period, handle)
            })
            .collect();
        CacheWarmup { handles }
    }

    async fn fetch_year(&self, year: i32, timeout: Duration) -> Result<Vec<YieldCurveEntry>> {
        with_deadline(timeout, self.provider.fetch_year(year, timeout)).await
    }

    async fn latest(&self) -> Result<Arc<YieldSnapshot>> {
        if let Some(snapshot) = self.cache.fresh_latest().await {
            return Ok(snapshot);
        }

        let _refill = self.cache.latest_refill_lock().lock().await;
        if let Some(snapshot) = self.cache.fresh_latest().await {
            return Ok(snapshot);
        }

        let snapshot = self.fetch_latest().await?;
        debug!("Cached latest yields for {}", snapshot.date);
        Ok(self.cache.store_latest(snapshot).await)
    }

    async fn fetch_latest(&self) -> Result<YieldSnapshot> {
        let year = (self.today)().year();
        let mut entries = self.fetch_year(year, SINGLE_YEAR_FETCH_TIMEOUT).await?;
        if latest_entry(&entries).is_none() {
            warn!(
                "No yield curve entries published for {}, falling back to {}",
                year,
                year - 1
            );
            entries = self.fetch_year(year - 1, SINGLE_YEAR_FETCH_TIMEOUT).await?;
        }

        let (date, entry) = latest_entry(&entries).ok_or_else(|| {
            YieldError::NoData(format!("no yield curve entries for {} or {}", year, year - 1))
        })?;
        Ok(YieldSnapshot::from_entry(date, entry))
    }

    async fn historical(&self, period: Period) -> Result<Arc<HistoricalYieldSeries>> {
        if let Some(series) = self.cache.historical(period).await {
            return Ok(series);
        }

        let _refill = self.cache.historical_refill_lock(period).lock().await;
        if let Some(series) = self.cache.historical(period).await {
            return Ok(series);
        }

        let series = self.build_historical(period).await?;
        info!(
            "Cached historical yields for {} ({} points)",
            period,
            series.data.len()
        );
        Ok(self.cache.store_historical(series).await)
    }

    async fn build_historical(&self, period: Period) -> Result<HistoricalYieldSeries> {
        let end_date = (self.today)();
        let start_date = period.start_date(end_date);
        let years: Vec<i32> = (start_date.year()..=end_date.year()).collect();
        let timeout = if years.len() > 1 {
            MULTI_YEAR_FETCH_TIMEOUT
        } else {
            SINGLE_YEAR_FETCH_TIMEOUT
        };

        debug!(
            "Fetching {} year(s) of yield data for {} ({} to {})",
            years.len(),
            period,
            start_date,
            end_date
        );
        let per_year = try_join_all(years.iter().map(|&year| self.fetch_year(year, timeout)))
            .await?;

        let points: Vec<HistoricalYieldPoint> = per_year
            .iter()
            .flatten()
            .filter_map(|entry| entry.date().map(|date| (date, entry)))
            .filter(|(date, _)| *date >= start_date && *date <= end_date)
            .map(|(date, entry)| HistoricalYieldPoint::from_entry(date, entry))
            .collect();

        if points.is_empty() {
            return Err(YieldError::NoData(format!(
                "no yield curve entries between {} and {}",
                start_date, end_date
            ))
            .into());
        }

        Ok(HistoricalYieldSeries {
            period,
            start_date,
            end_date,
            terms: HISTORICAL_TERMS.to_vec(),
            data: downsample(points, period),
        })
    }
}

#[async_trait]
impl YieldServiceTrait for YieldService {
    async fn get_latest_yields(&self) -> Result<Arc<YieldSnapshot>> {
        self.latest().await
    }

    async fn get_historical_yields(&self, period: &str) -> Result<Arc<HistoricalYieldSeries>> {
        let period: Period = period.parse()?;
        self.historical(period).await
    }

    async fn get_current_rate(&self, term: Term) -> Result<Decimal> {
        let snapshot = self.latest().await?;
        snapshot.rate(term).ok_or_else(|| {
            YieldError::NoData(format!(
                "no {} yield published for {}",
                term, snapshot.date
            ))
            .into()
        })
    }
}

/// Background historical cache fill started by [`YieldService::warm_cache`].
pub struct CacheWarmup {
    handles: Vec<(Period, JoinHandle<()>)>,
}

impl CacheWarmup {
    pub fn periods(&self) -> Vec<Period> {
        self.handles.iter().map(|(period, _)| *period).collect()
    }

    /// Wait for every period task to finish.
    pub async fn wait(self) {
        for (period, handle) in self.handles {
            if let Err(e) = handle.await {
                error!("Historical yield warmup task for {} failed: {}", period, e);
            }
        }
    }
}

fn latest_entry(entries: &[YieldCurveEntry]) -> Option<(NaiveDate, &YieldCurveEntry)> {
    entries
        .iter()
        .filter_map(|entry| entry.date().map(|date| (date, entry)))
        .max_by_key(|(date, _)| *date)
}

async fn with_deadline<T, F>(timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, treasury_market_data::MarketDataError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(|e| YieldError::from(e).into()),
        Err(_) => Err(YieldError::Fetch(format!(
            "request timed out after {}s",
            timeout.as_secs()
        ))
        .into()),
    }
}
