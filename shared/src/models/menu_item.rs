//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity (菜品)
///
/// Owned by the admin; read-only for customers. Orders keep their own
/// denormalized copy of name/price, so editing or deleting a menu item
/// never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category_id: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub sold_out: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category_id: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub sold_out: bool,
}

/// Update menu item payload (partial; sold-out toggling goes through here)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_out: Option<bool>,
}
