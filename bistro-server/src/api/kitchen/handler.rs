//! Kitchen API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use shared::models::{Order, OrderStatus};

use crate::analytics::{self, PrepLine};
use crate::core::ServerState;
use crate::feed::filter_orders;
use crate::utils::AppResult;

/// 厨房工作视图：活跃订单 (最新在前) 加上按菜品合并的备餐汇总
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenView {
    pub orders: Vec<Order>,
    pub prep_summary: Vec<PrepLine>,
}

/// GET /api/kitchen/orders - 活跃订单与备餐汇总
pub async fn active_orders(State(state): State<ServerState>) -> AppResult<Json<KitchenView>> {
    let all = state.ledger().repository().find_all().await?;
    let prep_summary = analytics::prep_summary(&all);
    let active = OrderStatus::active();
    let orders = filter_orders(all, Some(&active));
    Ok(Json(KitchenView {
        orders,
        prep_summary,
    }))
}
