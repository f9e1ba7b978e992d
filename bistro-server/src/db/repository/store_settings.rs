//! Store Settings Repository
//!
//! Singleton record `settings:general`, created lazily with
//! `isOpen = true` on first read.

use shared::models::{StoreSettings, StoreSettingsUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};

const FIELDS: &str = "isOpen, name, phone, address, currency";

#[derive(Clone)]
pub struct StoreSettingsRepository {
    base: BaseRepository,
}

impl StoreSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn read(&self) -> RepoResult<Option<StoreSettings>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM settings:general"))
            .await?;
        let settings: Vec<StoreSettings> = result.take(0)?;
        Ok(settings.into_iter().next())
    }

    /// Read the settings, creating the default record if absent.
    ///
    /// Two concurrent first reads may both attempt the CREATE; the loser
    /// re-reads instead of failing, so initialization happens exactly once.
    pub async fn get(&self) -> RepoResult<StoreSettings> {
        if let Some(settings) = self.read().await? {
            return Ok(settings);
        }

        let defaults = StoreSettings::default();
        let created = self
            .base
            .db()
            .query("CREATE settings:general CONTENT $data RETURN NONE")
            .bind(("data", defaults.clone()))
            .await?
            .check();

        match created {
            Ok(_) => Ok(defaults),
            // Lost the init race: the record exists now, read it back.
            Err(_) => self
                .read()
                .await?
                .ok_or_else(|| RepoError::Database("Settings record unreadable".into())),
        }
    }

    /// Merge-write (admin only). Creates the record when missing.
    pub async fn update(&self, patch: StoreSettingsUpdate) -> RepoResult<StoreSettings> {
        // Ensure defaults exist before merging a partial patch
        self.get().await?;
        self.base
            .db()
            .query("UPDATE settings:general MERGE $patch RETURN NONE")
            .bind(("patch", patch))
            .await?
            .check()?;
        self.read()
            .await?
            .ok_or_else(|| RepoError::Database("Settings record unreadable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn first_read_creates_defaults() {
        let db = DbService::memory().await.unwrap();
        let repo = StoreSettingsRepository::new(db);

        let settings = repo.get().await.unwrap();
        assert!(settings.is_open);
        assert_eq!(settings.currency, "usd");

        // A second read returns the stored record, not a new one
        let again = repo.get().await.unwrap();
        assert!(again.is_open);
    }

    #[tokio::test]
    async fn update_merges_partial_patch() {
        let db = DbService::memory().await.unwrap();
        let repo = StoreSettingsRepository::new(db);

        let updated = repo
            .update(StoreSettingsUpdate {
                is_open: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!updated.is_open);
        // untouched fields keep their defaults
        assert_eq!(updated.currency, "usd");

        let updated = repo
            .update(StoreSettingsUpdate {
                name: Some("Bistro Live".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!updated.is_open, "merge must not reset other fields");
        assert_eq!(updated.name, "Bistro Live");
    }
}
