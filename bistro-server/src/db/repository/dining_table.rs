//! Dining Table Repository
//!
//! Positions arrive from a continuous drag interaction and are clamped to
//! the [0,100] canvas on every write.

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_key, record_id};

const TABLE: &str = "dining_table";

const FIELDS: &str =
    "record::id(id) AS id, number, seats, x, y, status, reservationTime";

fn clamp_coord(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All tables ordered by table number (string order).
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE} ORDER BY number ASC"))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE} WHERE id = $id"))
            .bind(("id", record_id(TABLE, id)))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if data.number.trim().is_empty() {
            return Err(RepoError::Validation("Table number is required".into()));
        }
        let table = DiningTable {
            id: new_key(),
            number: data.number,
            seats: data.seats.max(1),
            x: clamp_coord(data.x),
            y: clamp_coord(data.y),
            status: TableStatus::Available,
            reservation_time: String::new(),
        };
        let content = super::content_without_id(&table)?;
        self.base
            .db()
            .query("CREATE $id CONTENT $data RETURN NONE")
            .bind(("id", record_id(TABLE, &table.id)))
            .bind(("data", content))
            .await?
            .check()?;
        Ok(table)
    }

    pub async fn update(&self, id: &str, patch: DiningTableUpdate) -> RepoResult<DiningTable> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Table {} not found", id)));
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
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Persist a drag movement frame. Coordinates are clamped to [0,100]
    /// on both axes before the write.
    pub async fn update_position(&self, id: &str, x: f64, y: f64) -> RepoResult<DiningTable> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Table {} not found", id)));
        }
        self.base
            .db()
            .query("UPDATE $id SET x = $x, y = $y RETURN NONE")
            .bind(("id", record_id(TABLE, id)))
            .bind(("x", clamp_coord(x)))
            .bind(("y", clamp_coord(y)))
            .await?
            .check()?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn position_is_clamped_on_write() {
        let db = DbService::memory().await.unwrap();
        let repo = DiningTableRepository::new(db);
        let table = repo
            .create(DiningTableCreate {
                number: "5".into(),
                seats: 4,
                x: 50.0,
                y: 50.0,
            })
            .await
            .unwrap();

        let moved = repo.update_position(&table.id, -12.0, 140.0).await.unwrap();
        assert_eq!(moved.x, 0.0);
        assert_eq!(moved.y, 100.0);

        let moved = repo.update_position(&table.id, 33.3, 66.6).await.unwrap();
        assert!((moved.x - 33.3).abs() < f64::EPSILON);
        assert!((moved.y - 66.6).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn create_rejects_empty_number() {
        let db = DbService::memory().await.unwrap();
        let repo = DiningTableRepository::new(db);
        let err = repo
            .create(DiningTableCreate {
                number: "  ".into(),
                seats: 2,
                x: 50.0,
                y: 50.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
