//! 分类管理路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 获取所有分类 (按显示顺序) |
//! | / | POST | 创建分类 |
//! | /{id} | GET | 获取单个分类 |
//! | /{id} | PUT | 更新分类 |
//! | /{id} | DELETE | 删除分类 |

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::remove),
        )
}
