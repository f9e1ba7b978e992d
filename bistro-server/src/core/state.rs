//! 服务器共享状态
//!
//! 所有 HTTP 处理器通过 `State(ServerState)` 拿到同一份状态。仓库对象
//! 很轻 (只持有数据库句柄)，按调用构造。

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    CategoryRepository, DiningTableRepository, MenuItemRepository, StaffRepository,
    StoreSettingsRepository,
};
use crate::feed::OrderFeed;
use crate::ledger::OrderLedger;
use crate::payment::PaymentService;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    pub feed: OrderFeed,
    pub payment: PaymentService,
}

impl ServerState {
    /// 初始化全部服务 (数据库、订阅层、支付)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::open(&config.database_dir()).await?;

        let payment = PaymentService::new(config.stripe_secret_key.clone());
        if !payment.is_configured() {
            tracing::warn!("STRIPE_SECRET_KEY not set, payment endpoints disabled");
        }

        Ok(Self {
            config: Arc::new(config.clone()),
            db,
            feed: OrderFeed::new(),
            payment,
        })
    }

    /// 内存数据库状态 (测试)
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db = DbService::memory().await?;
        let payment = PaymentService::new(config.stripe_secret_key.clone());
        Ok(Self {
            config: Arc::new(config),
            db,
            feed: OrderFeed::new(),
            payment,
        })
    }

    // ========== Service Accessors ==========

    pub fn ledger(&self) -> OrderLedger {
        OrderLedger::new(self.db.clone(), self.feed.clone())
    }

    pub fn menu_items(&self) -> MenuItemRepository {
        MenuItemRepository::new(self.db.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.db.clone())
    }

    pub fn tables(&self) -> DiningTableRepository {
        DiningTableRepository::new(self.db.clone())
    }

    pub fn settings(&self) -> StoreSettingsRepository {
        StoreSettingsRepository::new(self.db.clone())
    }

    pub fn staff(&self) -> StaffRepository {
        StaffRepository::new(self.db.clone())
    }
}
