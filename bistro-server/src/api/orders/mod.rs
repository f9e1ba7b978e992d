//! 订单路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 订单列表 (可选 `status` CSV 过滤, 最新在前) |
//! | / | POST | 提交订单 |
//! | /{id} | GET | 获取单个订单 |
//! | /{id}/status | PUT | 推进订单状态 |
//! | /{id}/priority | PUT | 设置/清除优先标记 |

pub mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::submit))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/priority", put(handler::update_priority))
}
