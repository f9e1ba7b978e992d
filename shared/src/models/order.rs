//! Order Model
//!
//! The order ledger is the central entity tying the customer, kitchen and
//! admin views together. Orders are append-mostly: after submission only
//! `status`, `completedAt` and `priority` ever change.

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// The full transition table is:
///
/// | From        | To          |
/// |-------------|-------------|
/// | pending     | in-progress |
/// | pending     | completed   |
/// | in-progress | completed   |
///
/// `completed` is terminal. The kitchen display only exposes the direct
/// "complete" action; `pending → in-progress` is modeled but not driven by
/// any shipped control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl OrderStatus {
    /// Whether moving from `self` to `next` is a legal lifecycle step.
    ///
    /// Same-status is not a transition; callers treat it as a no-op.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::InProgress)
                | (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::InProgress, OrderStatus::Completed)
        )
    }

    /// Statuses the kitchen display cares about.
    pub fn active() -> Vec<OrderStatus> {
        vec![OrderStatus::Pending, OrderStatus::InProgress]
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "in-progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(format!("Unknown order status: {}", other)),
        }
    }
}

/// Order line item — a denormalized snapshot of the menu item at order time.
///
/// Invariant: later edits to the menu item must never alter this copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    /// Category label snapshot; missing values aggregate under "Other".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub table_number: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Fixed at submission; never recomputed afterwards.
    pub total_price: f64,
    /// Creation time, Unix epoch milliseconds.
    pub timestamp: i64,
    /// Set exactly when status becomes `completed`, never otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    /// Payment processor reference; at most one order exists per reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    /// Kitchen triage flag, mutable until completion.
    #[serde(default)]
    pub priority: bool,
}

impl Order {
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(InProgress));
        assert!(Pending.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Completed));

        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(Pending));
        // same-status is not a transition
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Completed));
    }

    #[test]
    fn status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, OrderStatus::Pending);
    }

    #[test]
    fn order_serializes_camel_case() {
        let order = Order {
            id: "o1".into(),
            table_number: "12".into(),
            items: vec![],
            status: OrderStatus::Pending,
            total_price: 22.0,
            timestamp: 1_700_000_000_000,
            completed_at: None,
            payment_intent_id: Some("pi_123".into()),
            priority: false,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["tableNumber"], "12");
        assert_eq!(json["totalPrice"], 22.0);
        assert_eq!(json["paymentIntentId"], "pi_123");
        assert!(json.get("completedAt").is_none());
    }
}
