//! 餐桌管理路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 获取所有餐桌 |
//! | / | POST | 创建餐桌 |
//! | /{id} | PUT | 更新餐桌 |
//! | /{id} | DELETE | 删除餐桌 |
//! | /{id}/position | PUT | 更新位置 (clamp 到 [0,100]) |
//! | /{id}/status | PUT | 更新状态 (+可选预订时间) |
//! | /{id}/orders | GET | 该桌进行中订单与近一小时历史 |

pub mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::remove))
        .route("/{id}/position", put(handler::update_position))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/orders", get(handler::table_orders))
}
