//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table occupancy status, set by explicit user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
}

/// Dining table entity (桌台)
///
/// `x`/`y` are percentage coordinates in [0,100] within the floor-plan
/// canvas; positions are updated by drag interaction and clamped on write.
/// `number` is a free-form string and is NOT foreign-key checked against
/// `Order.tableNumber` — the cross-reference is computed on read by string
/// equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: String,
    pub number: String,
    pub seats: u32,
    pub x: f64,
    pub y: f64,
    pub status: TableStatus,
    /// Free-text, only meaningful when status is `reserved`.
    #[serde(default)]
    pub reservation_time: String,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    pub number: String,
    pub seats: u32,
    #[serde(default = "default_coord")]
    pub x: f64,
    #[serde(default = "default_coord")]
    pub y: f64,
}

fn default_coord() -> f64 {
    50.0
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_time: Option<String>,
}
