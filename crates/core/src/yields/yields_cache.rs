//! In-memory yield cache.
//!
//! One instance is created at process start and shared by every
//! [`YieldService`](super::YieldService) through an `Arc`. It holds:
//!
//! - the latest snapshot, served for `ttl` after it was fetched (1 hour by default)
//! - one historical series per period, kept for the life of the process
//! - one refill lock per cache key, so concurrent misses run a single fetch
//!
//! Ages are measured with `tokio::time::Instant`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use super::yields_model::{HistoricalYieldSeries, Period, YieldSnapshot};
use crate::constants::LATEST_YIELDS_TTL;

struct CachedSnapshot {
    snapshot: Arc<YieldSnapshot>,
    fetched_at: Instant,
}

pub struct YieldCache {
    ttl: Duration,
    latest: RwLock<Option<CachedSnapshot>>,
    latest_refill: Mutex<()>,
    historical: RwLock<HashMap<Period, Arc<HistoricalYieldSeries>>>,
    historical_refill: HashMap<Period, Mutex<()>>,
}

impl YieldCache {
    /// Create a cache with the default latest-snapshot TTL.
    pub fn new() -> Self {
        Self::with_ttl(LATEST_YIELDS_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            latest: RwLock::new(None),
            latest_refill: Mutex::new(()),
            historical: RwLock::new(HashMap::new()),
            historical_refill: Period::ALL
                .into_iter()
                .map(|p| (p, Mutex::new(())))
                .collect(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Latest snapshot if it is younger than the TTL.
    pub async fn fresh_latest(&self) -> Option<Arc<YieldSnapshot>> {
        let guard = self.latest.read().await;
        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| Arc::clone(&cached.snapshot))
    }

    pub async fn store_latest(&self, snapshot: YieldSnapshot) -> Arc<YieldSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.latest.write().await = Some(CachedSnapshot {
            snapshot: Arc::clone(&snapshot),
            fetched_at: Instant::now(),
        });
        snapshot
    }

    /// Drop the latest snapshot so the next read refetches.
    pub async fn invalidate_latest(&self) {
        *self.latest.write().await = None;
    }

    pub async fn historical(&self, period: Period) -> Option<Arc<HistoricalYieldSeries>> {
        self.historical.read().await.get(&period).cloned()
    }

    pub async fn store_historical(
        &self,
        series: HistoricalYieldSeries,
    ) -> Arc<HistoricalYieldSeries> {
        let series = Arc::new(series);
        self.historical
            .write()
            .await
            .insert(series.period, Arc::clone(&series));
        series
    }

    /// Periods that currently have a cached series.
    pub async fn cached_periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.historical.read().await.keys().copied().collect();
        periods.sort();
        periods
    }

    pub(crate) fn latest_refill_lock(&self) -> &Mutex<()> {
        &self.latest_refill
    }

    pub(crate) fn historical_refill_lock(&self, period: Period) -> &Mutex<()> {
        // Every period is inserted at construction.
        &self.historical_refill[&period]
    }
}

impl Default for YieldCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yields::HISTORICAL_TERMS;
    use chrono::NaiveDate;

    fn snapshot() -> YieldSnapshot {
        YieldSnapshot {
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            yields: Vec::new(),
        }
    }

    fn series(period: Period) -> HistoricalYieldSeries {
        let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        HistoricalYieldSeries {
            period,
            start_date: period.start_date(day),
            end_date: day,
            terms: HISTORICAL_TERMS.to_vec(),
            data: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_empty_cache_misses() {
        let cache = YieldCache::new();
        assert!(cache.fresh_latest().await.is_none());
        assert!(cache.historical(Period::OneYear).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_expires_after_ttl() {
        let cache = YieldCache::with_ttl(Duration::from_secs(60));
        cache.store_latest(snapshot()).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.fresh_latest().await.is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.fresh_latest().await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_latest() {
        let cache = YieldCache::new();
        cache.store_latest(snapshot()).await;
        cache.invalidate_latest().await;
        assert!(cache.fresh_latest().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_historical_never_expires() {
        let cache = YieldCache::with_ttl(Duration::from_secs(1));
        cache.store_historical(series(Period::FiveYear)).await;

        tokio::time::advance(Duration::from_secs(365 * 24 * 3600)).await;
        assert!(cache.historical(Period::FiveYear).await.is_some());
        assert!(cache.historical(Period::TenYear).await.is_none());
        assert_eq!(cache.cached_periods().await, vec![Period::FiveYear]);
    }
}
