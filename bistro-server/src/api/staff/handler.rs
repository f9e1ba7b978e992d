//! Staff API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{StaffMember, StaffMemberCreate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/staff - 获取所有员工
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StaffMember>>> {
    let staff = state.staff().find_all().await?;
    Ok(Json(staff))
}

/// POST /api/staff - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffMemberCreate>,
) -> AppResult<Json<StaffMember>> {
    let member = state.staff().create(payload).await?;
    Ok(Json(member))
}

/// DELETE /api/staff/{id} - 删除员工
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.staff().delete(&id).await?;
    Ok(Json(deleted))
}
