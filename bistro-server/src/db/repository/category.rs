//! Category Repository
//!
//! `order` (display order) is a field name, so it is backtick-escaped in
//! queries to keep it out of the `ORDER BY` keyword space.

use shared::models::{Category, CategoryCreate, CategoryUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_key, record_id};

const TABLE: &str = "category";

const FIELDS: &str = "record::id(id) AS id, name, `order`";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories in display order (ascending).
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE} ORDER BY `order` ASC"))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE} WHERE id = $id"))
            .bind(("id", record_id(TABLE, id)))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let key = new_key();
        self.base
            .db()
            .query("CREATE $id CONTENT $data RETURN NONE")
            .bind(("id", record_id(TABLE, &key)))
            .bind(("data", data))
            .await?
            .check()?;
        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Created category not readable".into()))
    }

    pub async fn update(&self, id: &str, patch: CategoryUpdate) -> RepoResult<Category> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Category {} not found", id)));
        }
        self.base
            .db()
            .query("UPDATE $id MERGE $patch RETURN NONE")
            .bind(("id", record_id(TABLE, id)))
            .bind(("patch", patch))
            .await?
            .check()?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let existed = self.find_by_id(id).await?.is_some();
        if existed {
            self.base
                .db()
                .query("DELETE $id RETURN NONE")
                .bind(("id", record_id(TABLE, id)))
                .await?
                .check()?;
        }
        Ok(existed)
    }
}
