use std::sync::Arc;

use axum::{routing::get, Router};

use crate::main_lib::AppState;

async fn health() -> &'static str {
    "OK"
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
