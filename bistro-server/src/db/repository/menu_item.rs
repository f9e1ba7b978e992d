//! Menu Item Repository

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_key, record_id};

const TABLE: &str = "menu_item";

const FIELDS: &str =
    "record::id(id) AS id, name, description, price, categoryId, imageUrl, soldOut";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE}"))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE} WHERE id = $id"))
            .bind(("id", record_id(TABLE, id)))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.price < 0.0 {
            return Err(RepoError::Validation("Price must be non-negative".into()));
        }
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
            .ok_or_else(|| RepoError::Database("Created menu item not readable".into()))
    }

    pub async fn update(&self, id: &str, patch: MenuItemUpdate) -> RepoResult<MenuItem> {
        if patch.price.is_some_and(|p| p < 0.0) {
            return Err(RepoError::Validation("Price must be non-negative".into()));
        }
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
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
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete. Historical orders keep their denormalized copies.
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
