//! Order API Handlers
//!
//! 状态过滤按订阅层的策略在内存中完成：仓库返回完整的时间倒序结果集，
//! 这里按请求的状态集合筛选。

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Order, OrderItem, OrderStatus};

use crate::core::ServerState;
use crate::feed::filter_orders;
use crate::ledger::SubmitOrder;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated statuses, e.g. `status=pending,in-progress`
    pub status: Option<String>,
}

/// 提交订单的请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    pub table_number: String,
    pub items: Vec<OrderItem>,
    pub payment_intent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriorityRequest {
    pub priority: bool,
}

/// GET /api/orders - 订单列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let filter = match query.status {
        None => None,
        Some(csv) => Some(parse_status_filter(&csv)?),
    };
    let orders = state.ledger().repository().find_all().await?;
    Ok(Json(filter_orders(orders, filter.as_deref())))
}

/// POST /api/orders - 提交订单
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> AppResult<Json<Order>> {
    // 打烊时不接受新订单；浏览接口不受影响
    let settings = state.settings().get().await?;
    if !settings.is_open {
        return Err(AppError::business_rule(
            "The restaurant is currently closed",
        ));
    }

    let order = state
        .ledger()
        .submit(SubmitOrder {
            table_number: payload.table_number,
            items: payload.items,
            payment_intent_id: payload.payment_intent_id,
        })
        .await?;
    Ok(Json(order))
}

/// GET /api/orders/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .ledger()
        .repository()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// PUT /api/orders/{id}/status - 推进订单状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let target = OrderStatus::from_str(&payload.status)
        .map_err(|_| AppError::validation(format!("Unknown order status '{}'", payload.status)))?;
    let order = state.ledger().advance(&id, target).await?;
    Ok(Json(order))
}

/// PUT /api/orders/{id}/priority - 设置/清除优先标记
pub async fn update_priority(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePriorityRequest>,
) -> AppResult<Json<Order>> {
    let order = state.ledger().set_priority(&id, payload.priority).await?;
    Ok(Json(order))
}

fn parse_status_filter(csv: &str) -> AppResult<Vec<OrderStatus>> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            OrderStatus::from_str(s)
                .map_err(|_| AppError::validation(format!("Unknown order status '{}'", s)))
        })
        .collect()
}
