//! Staff Repository

use shared::models::{StaffMember, StaffMemberCreate, StaffStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_key, record_id};
use crate::utils::time;

const TABLE: &str = "staff";

const FIELDS: &str =
    "record::id(id) AS id, name, role, joinedAt, status, ordersHandled, phone, avatarUrl";

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All staff, newest joiners first.
    pub async fn find_all(&self) -> RepoResult<Vec<StaffMember>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE} ORDER BY joinedAt DESC"))
            .await?;
        let staff: Vec<StaffMember> = result.take(0)?;
        Ok(staff)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<StaffMember>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM {TABLE} WHERE id = $id"))
            .bind(("id", record_id(TABLE, id)))
            .await?;
        let staff: Vec<StaffMember> = result.take(0)?;
        Ok(staff.into_iter().next())
    }

    pub async fn create(&self, data: StaffMemberCreate) -> RepoResult<StaffMember> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("Name is required".into()));
        }
        let member = StaffMember {
            id: new_key(),
            name: data.name,
            role: data.role,
            joined_at: time::now_millis(),
            status: StaffStatus::Active,
            orders_handled: 0,
            phone: data.phone,
            avatar_url: data.avatar_url,
        };
        let content = super::content_without_id(&member)?;
        self.base
            .db()
            .query("CREATE $id CONTENT $data RETURN NONE")
            .bind(("id", record_id(TABLE, &member.id)))
            .bind(("data", content))
            .await?
            .check()?;
        Ok(member)
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
