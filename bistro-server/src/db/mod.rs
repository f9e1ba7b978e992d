//! Database Module
//!
//! Owns the embedded SurrealDB instance. Production uses the RocksDB
//! engine under `work_dir/database`; tests use the in-memory engine.

pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "bistro";
const DATABASE: &str = "main";

/// Database service — opens and namespaces the embedded store
pub struct DbService;

impl DbService {
    /// Open the on-disk database at `db_dir/bistro.db`
    pub async fn open(db_dir: &Path) -> Result<Surreal<Db>, AppError> {
        std::fs::create_dir_all(db_dir)
            .map_err(|e| AppError::database(format!("Failed to create database dir: {e}")))?;
        let db_path = db_dir.join("bistro.db");

        let db = Surreal::new::<RocksDb>(db_path.to_string_lossy().as_ref())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path.display(), "Database connection established");
        Ok(db)
    }

    /// In-memory database (tests)
    pub async fn memory() -> Result<Surreal<Db>, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_the_database_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_dir = dir.path().join("nested").join("database");

        let db = DbService::open(&db_dir).await.unwrap();
        assert!(db_dir.join("bistro.db").exists());

        // the handle is usable
        db.query("RETURN 1").await.unwrap();
    }
}
