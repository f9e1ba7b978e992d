//! Statistics API Handlers

use axum::{Json, extract::State};

use crate::analytics::{self, Statistics};
use crate::core::ServerState;
use crate::utils::{AppResult, time};

/// GET /api/statistics - 当前订单集合的聚合报表
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Statistics>> {
    let orders = state.ledger().repository().find_all().await?;
    Ok(Json(analytics::compute(&orders, time::now_millis())))
}
