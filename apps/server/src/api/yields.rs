use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use treasury_core::yields::{HistoricalYieldSeries, YieldSnapshot};

const DEFAULT_PERIOD: &str = "3M";

#[derive(Deserialize)]
struct HistoricalQuery {
    period: Option<String>,
}

async fn latest_yields(State(state): State<Arc<AppState>>) -> ApiResult<Json<YieldSnapshot>> {
    let snapshot = state.yield_service.get_latest_yields().await?;
    Ok(Json(snapshot.as_ref().clone()))
}

async fn historical_yields(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoricalQuery>,
) -> ApiResult<Json<HistoricalYieldSeries>> {
    let period = query
        .period
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PERIOD);
    let series = state.yield_service.get_historical_yields(period).await?;
    Ok(Json(series.as_ref().clone()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/yields", get(latest_yields))
        .route("/api/yields/historical", get(historical_yields))
}
