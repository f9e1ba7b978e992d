//! 订单实时订阅层 (snapshot delivery)
//!
//! # 架构
//!
//! ```text
//! ledger 写入 ──▶ OrderFeed::notify() ──▶ broadcast::Sender<LedgerChanged>
//!                                              │
//!                          ┌───────────────────┼───────────────────┐
//!                          ▼                   ▼                   ▼
//!                    subscriber task     subscriber task     subscriber task
//!                    (requery + filter)  (requery + filter)  (requery + filter)
//!                          │                   │                   │
//!                          ▼                   ▼                   ▼
//!                    Kitchen view        Admin orders view   Table layout view
//! ```
//!
//! 每次账本变更后，订阅任务重新查询完整结果集 (timestamp 降序)，在内存中
//! 按状态过滤，然后把整个快照推送给消费者 — 消费者整体替换工作集，而不是
//! 增量合并。取消订阅 (或 drop) 通过 CancellationToken 终止任务；这是
//! 正确性要求，泄漏的监听器会持续消费资源。

use shared::models::{Order, OrderStatus};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::db::repository::OrderRepository;

/// Ledger change signal. Carries no data: subscribers requery.
#[derive(Debug, Clone, Copy)]
pub struct LedgerChanged;

/// Capacity of the change-signal channel. Signals are coalescable (every
/// one triggers a full requery), so lag only costs one extra refresh.
const CHANNEL_CAPACITY: usize = 256;

/// Per-subscriber snapshot buffer.
const SNAPSHOT_BUFFER: usize = 16;

/// 订单集合的发布/订阅通道
#[derive(Debug, Clone)]
pub struct OrderFeed {
    tx: broadcast::Sender<LedgerChanged>,
    shutdown: CancellationToken,
}

impl OrderFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// 通知所有订阅者账本发生了变更 (创建/更新)
    ///
    /// 没有订阅者时发送失败是正常情况。
    pub fn notify(&self) {
        let _ = self.tx.send(LedgerChanged);
    }

    /// 订阅订单快照流
    ///
    /// 订阅建立后立即投递一次初始快照 (initial-load 信号)，之后每次账本
    /// 变更投递一次完整的、按 timestamp 降序排序、按 `filter` 过滤的结果集。
    pub fn subscribe(
        &self,
        repo: OrderRepository,
        filter: Option<Vec<OrderStatus>>,
    ) -> OrderSubscription {
        let (snap_tx, snap_rx) = mpsc::channel(SNAPSHOT_BUFFER);
        let cancel = self.shutdown.child_token();
        let mut changes = self.tx.subscribe();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            // Initial snapshot doubles as the load-completion signal
            if !deliver(&repo, &filter, &snap_tx).await {
                return;
            }

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    result = changes.recv() => match result {
                        Ok(LedgerChanged) => {
                            if !deliver(&repo, &filter, &snap_tx).await {
                                break;
                            }
                        }
                        // Lagged: changes were dropped, but a single
                        // requery resyncs the full snapshot anyway.
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::debug!(skipped, "Order feed subscriber lagged, resyncing");
                            if !deliver(&repo, &filter, &snap_tx).await {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });

        OrderSubscription {
            rx: snap_rx,
            cancel,
        }
    }

    /// 关闭整个订阅层 (服务器停机)
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Requery, filter, push. Returns false when the worker should stop
/// (consumer gone, or the store failed — no automatic reconnect).
async fn deliver(
    repo: &OrderRepository,
    filter: &Option<Vec<OrderStatus>>,
    tx: &mpsc::Sender<Vec<Order>>,
) -> bool {
    let orders = match repo.find_all().await {
        Ok(orders) => orders,
        Err(e) => {
            tracing::error!(error = %e, "Order feed query failed, stopping subscription");
            return false;
        }
    };
    let snapshot = filter_orders(orders, filter.as_deref());
    tx.send(snapshot).await.is_ok()
}

/// Client-side status filtering over the already-sorted result set.
pub fn filter_orders(orders: Vec<Order>, filter: Option<&[OrderStatus]>) -> Vec<Order> {
    match filter {
        None => orders,
        Some(statuses) => orders
            .into_iter()
            .filter(|o| statuses.contains(&o.status))
            .collect(),
    }
}

/// 一次订阅的句柄
///
/// 消费者通过 [`next`](OrderSubscription::next) 接收快照；视图销毁时必须
/// 调用 [`cancel`](OrderSubscription::cancel) 或直接 drop 该句柄。
#[derive(Debug)]
pub struct OrderSubscription {
    rx: mpsc::Receiver<Vec<Order>>,
    cancel: CancellationToken,
}

impl OrderSubscription {
    /// 下一个快照；订阅终止后返回 None
    pub async fn next(&mut self) -> Option<Vec<Order>> {
        self.rx.recv().await
    }

    /// 显式取消订阅 (幂等)
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for OrderSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::ledger::{OrderLedger, SubmitOrder};
    use shared::models::OrderItem;

    fn item(id: &str, price: f64, qty: u32) -> OrderItem {
        OrderItem {
            menu_item_id: id.into(),
            name: id.to_uppercase(),
            price,
            quantity: qty,
            category: None,
            notes: None,
        }
    }

    async fn ledger() -> (OrderLedger, OrderFeed, OrderRepository) {
        let db = DbService::memory().await.unwrap();
        let feed = OrderFeed::new();
        let repo = OrderRepository::new(db.clone());
        (OrderLedger::new(db, feed.clone()), feed, repo)
    }

    #[tokio::test]
    async fn initial_snapshot_is_delivered_immediately() {
        let (ledger, feed, repo) = ledger().await;
        ledger
            .submit(SubmitOrder {
                table_number: "1".into(),
                items: vec![item("m1", 5.0, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();

        let mut sub = feed.subscribe(repo, None);
        let snapshot = sub.next().await.expect("initial snapshot");
        assert_eq!(snapshot.len(), 1);
    }

    #[tokio::test]
    async fn filtered_snapshots_hold_the_filter_invariant() {
        let (ledger, feed, repo) = ledger().await;
        let first = ledger
            .submit(SubmitOrder {
                table_number: "1".into(),
                items: vec![item("m1", 5.0, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();

        let mut sub = feed.subscribe(repo, Some(OrderStatus::active()));
        let snapshot = sub.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);

        // completing the order pushes a refreshed snapshot without it
        ledger
            .advance(&first.id, OrderStatus::Completed)
            .await
            .unwrap();
        let snapshot = sub.next().await.unwrap();
        assert!(snapshot.iter().all(|o| o.status != OrderStatus::Completed));
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn snapshots_are_sorted_timestamp_descending() {
        let (ledger, feed, repo) = ledger().await;
        for table in ["1", "2", "3"] {
            ledger
                .submit(SubmitOrder {
                    table_number: table.into(),
                    items: vec![item("m1", 5.0, 1)],
                    payment_intent_id: None,
                })
                .await
                .unwrap();
            // distinct creation timestamps
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let mut sub = feed.subscribe(repo, None);
        let snapshot = sub.next().await.unwrap();
        assert_eq!(snapshot.len(), 3);
        assert!(
            snapshot.windows(2).all(|w| w[0].timestamp >= w[1].timestamp),
            "snapshot must be newest-first"
        );
    }

    #[tokio::test]
    async fn cancelled_subscription_stops_delivering() {
        let (ledger, feed, repo) = ledger().await;
        let mut sub = feed.subscribe(repo, None);
        let _ = sub.next().await.unwrap();

        sub.cancel();
        // give the worker a chance to observe the cancellation
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        ledger
            .submit(SubmitOrder {
                table_number: "9".into(),
                items: vec![item("m1", 5.0, 1)],
                payment_intent_id: None,
            })
            .await
            .unwrap();

        // channel closes once the worker exits
        assert!(sub.next().await.is_none());
    }
}
