//! Store Settings API Handlers

use axum::{Json, extract::State};
use shared::models::{StoreSettings, StoreSettingsUpdate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/settings - 读取门店设置
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<StoreSettings>> {
    let settings = state.settings().get().await?;
    Ok(Json(settings))
}

/// PUT /api/settings - 合并更新 (开关营业状态等)
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<StoreSettingsUpdate>,
) -> AppResult<Json<StoreSettings>> {
    let settings = state.settings().update(payload).await?;
    Ok(Json(settings))
}
