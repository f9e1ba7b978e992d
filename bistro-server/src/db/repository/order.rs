//! Order Repository
//!
//! Persistence for the order ledger. All lifecycle decisions live in
//! [`crate::ledger::OrderLedger`]; this layer only reads and writes.
//! Reads are always sorted by creation timestamp descending — status
//! filtering happens in memory at the caller, matching the subscription
//! layer's filtering policy.

use shared::models::{Order, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult, content_without_id, record_id};

const TABLE: &str = "order";

const ORDER_FIELDS: &str = "record::id(id) AS id, tableNumber, items, status, totalPrice, \
     timestamp, completedAt, paymentIntentId, priority";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append a fully-built order. The caller owns id generation.
    pub async fn insert(&self, order: &Order) -> RepoResult<()> {
        let data = content_without_id(order)?;
        self.base
            .db()
            .query("CREATE $id CONTENT $data RETURN NONE")
            .bind(("id", record_id(TABLE, &order.id)))
            .bind(("data", data))
            .await?
            .check()?;
        Ok(())
    }

    /// All orders, newest first.
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM {TABLE} ORDER BY timestamp DESC"
            ))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {ORDER_FIELDS} FROM {TABLE} WHERE id = $id"))
            .bind(("id", record_id(TABLE, id)))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Duplicate-submission guard: look an order up by its payment
    /// reference before inserting a new one.
    pub async fn find_by_payment_intent(&self, payment_intent_id: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM {TABLE} WHERE paymentIntentId = $ref LIMIT 1"
            ))
            .bind(("ref", payment_intent_id.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Write a status change; `completed_at` is set only when provided.
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        completed_at: Option<i64>,
    ) -> RepoResult<()> {
        let query = match completed_at {
            Some(_) => "UPDATE $id SET status = $status, completedAt = $completed_at RETURN NONE",
            None => "UPDATE $id SET status = $status RETURN NONE",
        };
        let mut q = self
            .base
            .db()
            .query(query)
            .bind(("id", record_id(TABLE, id)))
            .bind(("status", status.as_str()));
        if let Some(ts) = completed_at {
            q = q.bind(("completed_at", ts));
        }
        q.await?.check()?;
        Ok(())
    }

    pub async fn set_priority(&self, id: &str, priority: bool) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $id SET priority = $priority RETURN NONE")
            .bind(("id", record_id(TABLE, id)))
            .bind(("priority", priority))
            .await?
            .check()?;
        Ok(())
    }
}
