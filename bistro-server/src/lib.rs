//! Bistro Live Server - 餐厅点餐平台服务端
//!
//! # 架构概述
//!
//! - **订单账本** (`ledger`): 订单生命周期与支付引用去重
//! - **实时订阅** (`feed`): 订单集合的快照推送 (snapshot delivery)
//! - **统计分析** (`analytics`): 营收、热销菜品、时段分布等纯聚合
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **支付** (`payment`): Stripe payment-intent 适配器
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! bistro-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 数据库层 (repositories)
//! ├── ledger/        # 订单账本与生命周期
//! ├── feed/          # 实时订阅层
//! ├── analytics/     # 统计聚合
//! ├── payment/       # 支付网关适配器
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod analytics;
pub mod api;
pub mod core;
pub mod db;
pub mod feed;
pub mod ledger;
pub mod payment;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use feed::{OrderFeed, OrderSubscription};
pub use ledger::OrderLedger;
pub use payment::PaymentService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____  _      __
   / __ )(_)____/ /__________
  / __  / / ___/ __/ ___/ __ \
 / /_/ / (__  ) /_/ /  / /_/ /
/_____/_/____/\__/_/   \____/
    "#
    );
}
