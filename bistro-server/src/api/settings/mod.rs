//! 门店设置路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 读取设置 (首次读取创建默认值) |
//! | / | PUT | 合并更新 |

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/", get(handler::get).put(handler::update))
}
