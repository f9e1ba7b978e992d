//! 菜单管理路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | / | GET | 获取所有菜品 |
//! | / | POST | 创建菜品 |
//! | /{id} | GET | 获取单个菜品 |
//! | /{id} | PUT | 更新菜品 (含售罄切换) |
//! | /{id} | DELETE | 删除菜品 |

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
