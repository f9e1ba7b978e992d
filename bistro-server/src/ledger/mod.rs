//! 订单账本 (Order Ledger)
//!
//! 订单生命周期的唯一写入口。校验、状态机推进、支付引用去重和完成时间戳
//! 都在这里决定；仓库层只负责读写。每次成功的变更都会通知订阅层重新推送
//! 快照。
//!
//! 状态机:
//!
//! ```text
//! pending ──▶ in-progress ──▶ completed
//!    └──────────────────────────▲
//! ```
//!
//! completed 是终态；`completedAt` 只在进入终态的那一次变更时写入。

use shared::models::{Order, OrderItem, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::OrderRepository;
use crate::feed::OrderFeed;
use crate::utils::time;
use crate::utils::{AppError, AppResult};

/// Completed orders stay visible to their table for one hour.
const RECENT_HISTORY_WINDOW_MS: i64 = 60 * 60 * 1000;

/// 提交一张新订单所需的数据
#[derive(Debug, Clone)]
pub struct SubmitOrder {
    pub table_number: String,
    pub items: Vec<OrderItem>,
    /// Payment reference from a captured charge, if the order was paid
    /// online before submission.
    pub payment_intent_id: Option<String>,
}

#[derive(Clone)]
pub struct OrderLedger {
    repo: OrderRepository,
    feed: OrderFeed,
}

impl OrderLedger {
    pub fn new(db: Surreal<Db>, feed: OrderFeed) -> Self {
        Self {
            repo: OrderRepository::new(db),
            feed,
        }
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.repo
    }

    /// 提交订单
    ///
    /// 服务端重新计算总价 (Σ price × quantity)，不信任客户端送来的金额。
    /// 携带支付引用的提交是幂等的：同一个 paymentIntentId 第二次提交时
    /// 返回已有订单而不是追加新记录。
    pub async fn submit(&self, data: SubmitOrder) -> AppResult<Order> {
        if data.table_number.trim().is_empty() {
            return Err(AppError::validation("Table number is required"));
        }
        if data.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }
        if data.items.iter().any(|i| i.quantity == 0) {
            return Err(AppError::validation("Item quantity must be positive"));
        }

        if let Some(ref payment_ref) = data.payment_intent_id
            && let Some(existing) = self.repo.find_by_payment_intent(payment_ref).await?
        {
            tracing::info!(
                order_id = %existing.id,
                payment_intent = %payment_ref,
                "Duplicate submission for payment reference, returning existing order"
            );
            return Ok(existing);
        }

        let total_price = data.items.iter().map(OrderItem::line_total).sum();
        let order = Order {
            id: crate::db::repository::new_key(),
            table_number: data.table_number,
            items: data.items,
            status: OrderStatus::Pending,
            total_price,
            timestamp: time::now_millis(),
            completed_at: None,
            payment_intent_id: data.payment_intent_id,
            priority: false,
        };

        self.repo.insert(&order).await?;
        tracing::info!(
            order_id = %order.id,
            table = %order.table_number,
            total = order.total_price,
            "Order submitted"
        );
        self.feed.notify();
        Ok(order)
    }

    /// 推进订单状态
    ///
    /// 只接受状态机允许的前向转换；同状态请求是无操作 (幂等)。进入
    /// completed 时写入 `completedAt`，且只写一次。
    pub async fn advance(&self, id: &str, target: OrderStatus) -> AppResult<Order> {
        let order = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

        if order.status == target {
            return Ok(order);
        }
        if !order.status.can_transition_to(target) {
            tracing::warn!(
                order_id = %id,
                from = %order.status.as_str(),
                to = %target.as_str(),
                "Rejected order status transition"
            );
            return Err(AppError::business_rule(format!(
                "Cannot move order from '{}' to '{}'",
                order.status.as_str(),
                target.as_str()
            )));
        }

        // completedAt is stamped exactly once, on the completing write
        let completed_at = match (target, order.completed_at) {
            (OrderStatus::Completed, None) => Some(time::now_millis()),
            _ => None,
        };
        self.repo.update_status(id, target, completed_at).await?;

        tracing::info!(
            order_id = %id,
            from = %order.status.as_str(),
            to = %target.as_str(),
            "Order status advanced"
        );
        self.feed.notify();

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))
    }

    /// 设置/清除优先标记；终态订单不再接受标记
    pub async fn set_priority(&self, id: &str, priority: bool) -> AppResult<Order> {
        let order = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

        if order.status.is_terminal() {
            return Err(AppError::business_rule(
                "Completed orders cannot be prioritized",
            ));
        }
        if order.priority == priority {
            return Ok(order);
        }

        self.repo.set_priority(id, priority).await?;
        self.feed.notify();

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))
    }

    /// 某张餐桌当前进行中的订单 (pending / in-progress)，最新的在前
    pub async fn ongoing_for_table(&self, table_number: &str) -> AppResult<Vec<Order>> {
        let orders = self.repo.find_all().await?;
        Ok(orders
            .into_iter()
            .filter(|o| o.table_number == table_number && !o.status.is_terminal())
            .collect())
    }

    /// 某张餐桌的近期完成历史
    ///
    /// 窗口按下单时间算：一小时前下的单即使刚刚完成也不再展示。
    pub async fn recent_history_for_table(&self, table_number: &str) -> AppResult<Vec<Order>> {
        let cutoff = time::now_millis() - RECENT_HISTORY_WINDOW_MS;
        let orders = self.repo.find_all().await?;
        Ok(orders
            .into_iter()
            .filter(|o| {
                o.table_number == table_number
                    && o.status == OrderStatus::Completed
                    && o.timestamp >= cutoff
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn item(id: &str, price: f64, qty: u32) -> OrderItem {
        OrderItem {
            menu_item_id: id.into(),
            name: id.to_uppercase(),
            price,
            quantity: qty,
            category: Some("Mains".into()),
            notes: None,
        }
    }

    async fn ledger() -> OrderLedger {
        let db = DbService::memory().await.unwrap();
        OrderLedger::new(db, OrderFeed::new())
    }

    #[tokio::test]
    async fn submit_computes_total_and_starts_pending() {
        let ledger = ledger().await;
        let order = ledger
            .submit(SubmitOrder {
                table_number: "12".into(),
                items: vec![item("burger", 9.5, 2), item("cola", 3.0, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert!((order.total_price - 22.0).abs() < f64::EPSILON);
        assert!(order.completed_at.is_none());
        assert!(!order.priority);
    }

    #[tokio::test]
    async fn submit_rejects_empty_and_zero_quantity() {
        let ledger = ledger().await;

        let err = ledger
            .submit(SubmitOrder {
                table_number: "1".into(),
                items: vec![],
                payment_intent_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = ledger
            .submit(SubmitOrder {
                table_number: "1".into(),
                items: vec![item("burger", 9.5, 0)],
                payment_intent_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_payment_reference_returns_existing_order() {
        let ledger = ledger().await;
        let first = ledger
            .submit(SubmitOrder {
                table_number: "3".into(),
                items: vec![item("soup", 6.0, 1)],
                payment_intent_id: Some("pi_abc123".into()),
            })
            .await
            .unwrap();

        // retry after a network failure on the client side
        let second = ledger
            .submit(SubmitOrder {
                table_number: "3".into(),
                items: vec![item("soup", 6.0, 1)],
                payment_intent_id: Some("pi_abc123".into()),
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(ledger.repository().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lifecycle_stamps_completed_at_exactly_once() {
        let ledger = ledger().await;
        let order = ledger
            .submit(SubmitOrder {
                table_number: "7".into(),
                items: vec![item("pasta", 11.0, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();

        let order = ledger
            .advance(&order.id, OrderStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);
        assert!(order.completed_at.is_none());

        let order = ledger
            .advance(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        let stamped = order.completed_at.expect("completedAt stamped");
        assert!(stamped >= order.timestamp);

        // repeating the terminal request is a no-op, timestamp untouched
        let again = ledger
            .advance(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(again.completed_at, Some(stamped));
    }

    #[tokio::test]
    async fn backward_transitions_are_rejected() {
        let ledger = ledger().await;
        let order = ledger
            .submit(SubmitOrder {
                table_number: "4".into(),
                items: vec![item("salad", 7.0, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();
        ledger
            .advance(&order.id, OrderStatus::Completed)
            .await
            .unwrap();

        let err = ledger
            .advance(&order.id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
        let err = ledger
            .advance(&order.id, OrderStatus::InProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn priority_flag_toggles_until_terminal() {
        let ledger = ledger().await;
        let order = ledger
            .submit(SubmitOrder {
                table_number: "2".into(),
                items: vec![item("steak", 19.0, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();

        let order = ledger.set_priority(&order.id, true).await.unwrap();
        assert!(order.priority);
        let order = ledger.set_priority(&order.id, false).await.unwrap();
        assert!(!order.priority);

        ledger
            .advance(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        let err = ledger.set_priority(&order.id, true).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn table_views_split_ongoing_and_recent_history() {
        let ledger = ledger().await;
        let ongoing = ledger
            .submit(SubmitOrder {
                table_number: "8".into(),
                items: vec![item("tea", 2.5, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();
        let done = ledger
            .submit(SubmitOrder {
                table_number: "8".into(),
                items: vec![item("cake", 5.5, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();
        ledger
            .advance(&done.id, OrderStatus::Completed)
            .await
            .unwrap();
        // another table's order must not leak into the views
        ledger
            .submit(SubmitOrder {
                table_number: "9".into(),
                items: vec![item("tea", 2.5, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();

        let active = ledger.ongoing_for_table("8").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, ongoing.id);

        let history = ledger.recent_history_for_table("8").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, done.id);
    }

    #[tokio::test]
    async fn history_window_is_keyed_on_creation_time() {
        let ledger = ledger().await;
        let now = time::now_millis();

        // ordered two hours ago, completed just now: outside the window
        let stale = Order {
            id: crate::db::repository::new_key(),
            table_number: "5".into(),
            items: vec![item("soup", 6.0, 1)],
            status: OrderStatus::Completed,
            total_price: 6.0,
            timestamp: now - 2 * 60 * 60 * 1000,
            completed_at: Some(now - 10 * 60 * 1000),
            payment_intent_id: None,
            priority: false,
        };
        ledger.repository().insert(&stale).await.unwrap();

        // ordered and completed within the hour: inside the window
        let fresh = ledger
            .submit(SubmitOrder {
                table_number: "5".into(),
                items: vec![item("cake", 5.5, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();
        ledger
            .advance(&fresh.id, OrderStatus::Completed)
            .await
            .unwrap();

        let history = ledger.recent_history_for_table("5").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, fresh.id);
    }
}
