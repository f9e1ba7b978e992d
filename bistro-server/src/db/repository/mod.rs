//! Repository Module
//!
//! One repository per collection, raw SurrealQL with explicit field
//! projections. Record keys are UUIDs generated here; queries project
//! `record::id(id)` so models carry plain string ids like the documents
//! in the original deployment.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod staff;
pub mod store_settings;

pub use category::CategoryRepository;
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use staff::StaffRepository;
pub use store_settings::StoreSettingsRepository;

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// New random record key (hex, no dashes)
pub(crate) fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Record pointer for a table + key pair
pub(crate) fn record_id(table: &str, key: &str) -> RecordId {
    RecordId::from_table_key(table, key)
}

/// Serialize an entity for `CREATE ... CONTENT`, dropping the `id` field
/// (the record id is bound separately as the record pointer).
pub(crate) fn content_without_id<T: Serialize>(entity: &T) -> RepoResult<serde_json::Value> {
    let mut value =
        serde_json::to_value(entity).map_err(|e| RepoError::Database(e.to_string()))?;
    if let Some(obj) = value.as_object_mut() {
        obj.remove("id");
    }
    Ok(value)
}
