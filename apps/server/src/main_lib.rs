use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use treasury_core::{
    ledger::{LedgerService, LedgerServiceTrait},
    users::{UserService, UserServiceTrait},
    yields::{YieldCache, YieldService, YieldServiceTrait},
};
use treasury_market_data::{TreasuryProvider, YieldCurveProvider};
use treasury_storage_sqlite::{
    db::{self, write_actor},
    HoldingRepository, LedgerRepository, TransactionRepository, UserRepository,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub ledger_service: Arc<dyn LedgerServiceTrait + Send + Sync>,
    pub yield_service: Arc<dyn YieldServiceTrait + Send + Sync>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = match &config.feed_url {
        Some(url) => TreasuryProvider::with_base_url(url.clone()),
        None => TreasuryProvider::new(),
    };
    build_state_with_provider(config, Arc::new(provider)).await
}

/// Wire repositories and services around an explicit yield curve source.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn YieldCurveProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Using database at {}", db_path);
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer(&pool)?;

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let holding_repository = Arc::new(HoldingRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let ledger_repository = Arc::new(LedgerRepository::new(writer.clone()));

    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let ledger_service = Arc::new(LedgerService::new(
        user_repository,
        holding_repository,
        transaction_repository,
        ledger_repository,
    ));

    let yield_cache = Arc::new(YieldCache::with_ttl(config.yield_ttl));
    let yield_service = Arc::new(YieldService::new(provider, yield_cache));
    // Detached from any request; per-period failures are logged by the warmup.
    let warmup = yield_service.warm_cache();
    tracing::info!(
        "Warming historical yield cache for {} periods",
        warmup.periods().len()
    );
    tokio::spawn(warmup.wait());

    Ok(Arc::new(AppState {
        user_service,
        ledger_service,
        yield_service,
    }))
}
