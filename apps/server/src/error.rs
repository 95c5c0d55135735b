use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use treasury_core::errors::{DatabaseError, Error as CoreError};
use treasury_core::ledger::LedgerError;
use treasury_core::yields::YieldError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) | CoreError::Pricing(_) => StatusCode::BAD_REQUEST,
        CoreError::Ledger(e) => match e {
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::Forbidden(_) => StatusCode::FORBIDDEN,
            LedgerError::DataIntegrity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::InvalidAmount(_)
            | LedgerError::InvalidYield(_)
            | LedgerError::InsufficientBalance(_)
            | LedgerError::InvalidState(_) => StatusCode::BAD_REQUEST,
        },
        CoreError::Yield(e) => match e {
            YieldError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            YieldError::Fetch(_) => StatusCode::BAD_GATEWAY,
            YieldError::NoData(_) => StatusCode::SERVICE_UNAVAILABLE,
        },
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(_) | CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
        }
        let body = Json(ErrorBody {
            success: false,
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
