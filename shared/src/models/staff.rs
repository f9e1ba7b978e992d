//! Staff Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Kitchen,
    Waiter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "on-break")]
    OnBreak,
    #[serde(rename = "off-duty")]
    OffDuty,
}

/// Staff member entity
///
/// Fully independent of the order ledger: `ordersHandled` is a plain
/// counter, there is no link from staff to the orders they handled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    /// Unix epoch milliseconds.
    pub joined_at: i64,
    pub status: StaffStatus,
    #[serde(default)]
    pub orders_handled: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMemberCreate {
    pub name: String,
    pub role: StaffRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
