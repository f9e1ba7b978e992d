//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/menu-items - 获取所有菜品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.menu_items().find_all().await?;
    Ok(Json(items))
}

/// GET /api/menu-items/{id} - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = state
        .menu_items()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.menu_items().create(payload).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/{id} - 更新菜品 (部分字段，含售罄切换)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.menu_items().update(&id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id} - 删除菜品
///
/// 历史订单保存的是下单时的快照，删除菜品不会波及已有订单。
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.menu_items().delete(&id).await?;
    Ok(Json(deleted))
}
