use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use treasury_core::{holdings::Holding, transactions::Transaction, users::User};

fn user_id(path: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::BadRequest("invalid user ID".to_string()))
}

async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.list_users()?;
    Ok(Json(users))
}

async fn list_transactions(
    path: Result<Path<i32>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let id = user_id(path)?;
    let transactions = state.ledger_service.list_transactions(id)?;
    Ok(Json(transactions))
}

/// Holdings that still have principal left, newest purchase first.
async fn list_active_holdings(
    path: Result<Path<i32>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Holding>>> {
    let id = user_id(path)?;
    let holdings = state
        .ledger_service
        .list_holdings(id)?
        .into_iter()
        .filter(Holding::is_active)
        .collect();
    Ok(Json(holdings))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}/transactions", get(list_transactions))
        .route("/users/{id}/holdings", get(list_active_holdings))
}
