//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, Order, TableStatus};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// 拖拽位置更新 (百分比坐标)
#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub status: TableStatus,
    /// Only meaningful together with `reserved`.
    pub reservation_time: Option<String>,
}

/// 某张餐桌的订单交叉视图 (读取时计算，非存储关系)
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOrdersView {
    pub ongoing: Vec<Order>,
    pub recent_history: Vec<Order>,
}

/// GET /api/tables - 获取所有餐桌
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.tables().find_all().await?;
    Ok(Json(tables))
}

/// POST /api/tables - 创建餐桌
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    let table = state.tables().create(payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/{id} - 更新餐桌
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let table = state.tables().update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id} - 删除餐桌
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.tables().delete(&id).await?;
    Ok(Json(deleted))
}

/// PUT /api/tables/{id}/position - 持久化一帧拖拽位置
pub async fn update_position(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PositionRequest>,
) -> AppResult<Json<DiningTable>> {
    if !payload.x.is_finite() || !payload.y.is_finite() {
        return Err(AppError::validation("Position must be finite"));
    }
    let table = state
        .tables()
        .update_position(&id, payload.x, payload.y)
        .await?;
    Ok(Json(table))
}

/// PUT /api/tables/{id}/status - 设置占用状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> AppResult<Json<DiningTable>> {
    let table = state
        .tables()
        .update(
            &id,
            DiningTableUpdate {
                status: Some(payload.status),
                reservation_time: payload.reservation_time,
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(table))
}

/// GET /api/tables/{id}/orders - 该桌进行中订单与近一小时完成历史
pub async fn table_orders(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrdersView>> {
    let table = state
        .tables()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;

    let ledger = state.ledger();
    let ongoing = ledger.ongoing_for_table(&table.number).await?;
    let recent_history = ledger.recent_history_for_table(&table.number).await?;
    Ok(Json(TableOrdersView {
        ongoing,
        recent_history,
    }))
}
