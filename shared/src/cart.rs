//! Customer Cart
//!
//! Client-side half of the ordering flow: builds the line items that
//! eventually become an order submission. Serializable so clients can
//! persist it across a page reload (checkout resumes after an external
//! payment redirect).

use serde::{Deserialize, Serialize};

use crate::models::{MenuItem, OrderItem};

/// In-progress cart for one table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub table_number: String,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a menu item, merging with an existing line.
    ///
    /// No-op when the item is sold out or the store is closed (`is_open`
    /// comes from the settings singleton). Browsing stays possible while
    /// closed; only mutating actions are gated.
    pub fn add(&mut self, item: &MenuItem, is_open: bool) {
        if !is_open || item.sold_out {
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|l| l.menu_item_id == item.id) {
            line.quantity += 1;
            return;
        }
        self.items.push(OrderItem {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
            category: None,
            notes: None,
        });
    }

    /// Adjust a line's quantity by `delta`; the line is removed at zero.
    pub fn change_quantity(&mut self, menu_item_id: &str, delta: i32) {
        for line in self.items.iter_mut() {
            if line.menu_item_id == menu_item_id {
                let next = line.quantity as i64 + delta as i64;
                line.quantity = next.max(0) as u32;
            }
        }
        self.items.retain(|l| l.quantity > 0);
    }

    /// Sum of price × quantity over all lines.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|l| l.line_total()).sum()
    }

    /// Total unit count (cart badge).
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.table_number.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger() -> MenuItem {
        MenuItem {
            id: "m1".into(),
            name: "Burger".into(),
            description: String::new(),
            price: 9.5,
            category_id: "c1".into(),
            image_url: String::new(),
            sold_out: false,
        }
    }

    fn fries() -> MenuItem {
        MenuItem {
            id: "m2".into(),
            name: "Fries".into(),
            description: String::new(),
            price: 3.0,
            category_id: "c1".into(),
            image_url: String::new(),
            sold_out: false,
        }
    }

    #[test]
    fn add_merges_by_menu_item() {
        let mut cart = Cart::new();
        cart.add(&burger(), true);
        cart.add(&burger(), true);
        cart.add(&fries(), true);

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.unit_count(), 3);
        assert_eq!(cart.total(), 22.0);
    }

    #[test]
    fn add_ignores_sold_out_items() {
        let mut item = burger();
        item.sold_out = true;
        let mut cart = Cart::new();
        cart.add(&item, true);
        assert!(cart.is_empty());
    }

    #[test]
    fn add_is_gated_when_store_closed() {
        let mut cart = Cart::new();
        cart.add(&burger(), false);
        assert!(cart.is_empty(), "closed store must leave the cart unchanged");
    }

    #[test]
    fn change_quantity_removes_at_zero() {
        let mut cart = Cart::new();
        cart.add(&burger(), true);
        cart.change_quantity("m1", 2);
        assert_eq!(cart.items[0].quantity, 3);

        cart.change_quantity("m1", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn survives_serialization_round_trip() {
        let mut cart = Cart::new();
        cart.add(&burger(), true);
        cart.table_number = "5".into();

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.table_number, "5");
        assert_eq!(restored.total(), 9.5);
    }
}
