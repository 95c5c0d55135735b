use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use treasury_core::{pricing::Term, users::User};

#[derive(Deserialize)]
struct CashRequest {
    user_id: i32,
    amount: Decimal,
}

#[derive(Deserialize)]
struct BuyRequest {
    user_id: i32,
    term: String,
    face_value: Decimal,
}

#[derive(Deserialize)]
struct SellRequest {
    user_id: i32,
    holding_id: i32,
    amount: Decimal,
}

#[derive(Serialize)]
struct LedgerResponse {
    success: bool,
    user: User,
}

#[derive(Serialize)]
struct BuyResponse {
    success: bool,
    user: User,
    face_value: Decimal,
    purchase_price: Decimal,
    discount: Decimal,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::BadRequest(format!("invalid request body: {}", e.body_text())))
}

async fn fund(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CashRequest>, JsonRejection>,
) -> ApiResult<Json<LedgerResponse>> {
    let req = body(payload)?;
    let user = state.ledger_service.fund(req.user_id, req.amount).await?;
    Ok(Json(LedgerResponse {
        success: true,
        user,
    }))
}

async fn withdraw(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CashRequest>, JsonRejection>,
) -> ApiResult<Json<LedgerResponse>> {
    let req = body(payload)?;
    let user = state.ledger_service.withdraw(req.user_id, req.amount).await?;
    Ok(Json(LedgerResponse {
        success: true,
        user,
    }))
}

/// Buys at the latest published yield for the requested term.
async fn buy(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BuyRequest>, JsonRejection>,
) -> ApiResult<Json<BuyResponse>> {
    let req = body(payload)?;
    let term: Term = req.term.parse().map_err(treasury_core::Error::from)?;
    let current_yield = state.yield_service.get_current_rate(term).await?;

    let receipt = state
        .ledger_service
        .buy_treasury(req.user_id, term.as_str(), req.face_value, current_yield)
        .await?;
    tracing::info!(
        "Buy order filled: user_id={}, term={}, face_value={:.2}, purchase_price={:.2}, yield={}%",
        req.user_id,
        term,
        receipt.face_value,
        receipt.purchase_price,
        current_yield
    );
    Ok(Json(BuyResponse {
        success: true,
        user: receipt.user,
        face_value: receipt.face_value,
        purchase_price: receipt.purchase_price,
        discount: receipt.discount,
    }))
}

async fn sell(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SellRequest>, JsonRejection>,
) -> ApiResult<Json<LedgerResponse>> {
    let req = body(payload)?;
    let receipt = state
        .ledger_service
        .sell_treasury(req.user_id, req.holding_id, req.amount)
        .await?;
    Ok(Json(LedgerResponse {
        success: true,
        user: receipt.user,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fund", post(fund))
        .route("/withdraw", post(withdraw))
        .route("/buy", post(buy))
        .route("/sell", post(sell))
}
