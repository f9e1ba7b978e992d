//! Store Settings Model

use serde::{Deserialize, Serialize};

/// Store settings (singleton record)
///
/// Created lazily with `isOpen = true` on first read. `isOpen` gates the
/// customer ordering flow: browsing stays available when closed, mutating
/// actions (add to cart, submit) are disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    #[serde(default = "default_open")]
    pub is_open: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_open() -> bool {
    true
}

fn default_currency() -> String {
    "usd".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            is_open: true,
            name: String::new(),
            phone: String::new(),
            address: String::new(),
            currency: default_currency(),
        }
    }
}

/// Merge-write payload (admin only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}
