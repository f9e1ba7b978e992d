//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menu_items`] - 菜单管理接口
//! - [`categories`] - 分类管理接口
//! - [`orders`] - 订单接口 (提交、查询、状态推进)
//! - [`kitchen`] - 厨房视图接口
//! - [`tables`] - 餐桌管理接口
//! - [`settings`] - 门店设置接口
//! - [`staff`] - 员工管理接口
//! - [`statistics`] - 销售统计接口
//! - [`payments`] - 支付意向接口

use axum::Router;

use crate::core::ServerState;

pub mod categories;
pub mod health;
pub mod kitchen;
pub mod menu_items;
pub mod orders;
pub mod payments;
pub mod settings;
pub mod staff;
pub mod statistics;
pub mod tables;

/// 组装完整路由表
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/menu-items", menu_items::router())
        .nest("/api/categories", categories::router())
        .nest("/api/orders", orders::router())
        .nest("/api/kitchen", kitchen::router())
        .nest("/api/tables", tables::router())
        .nest("/api/settings", settings::router())
        .nest("/api/staff", staff::router())
        .nest("/api/statistics", statistics::router())
        .merge(payments::router())
        .with_state(state)
}
