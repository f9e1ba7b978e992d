//! 员工管理路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 获取所有员工 (入职时间倒序) |
//! | / | POST | 创建员工 |
//! | /{id} | DELETE | 删除员工 |

pub mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::remove))
}
