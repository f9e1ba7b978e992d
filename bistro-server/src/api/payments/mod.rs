//! 支付意向路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/create-payment-intent | POST | 创建支付意向, 返回 `{ "clientSecret": ... }` |
//! | /api/create-payment-intent | GET | 探活 (API is active) |
//!
//! 其余方法由路由层返回 405。

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/create-payment-intent",
        get(handler::probe).post(handler::create_intent),
    )
}
