//! In-memory ad store
//!
//! Map plus counter behind a mutex. The counter only ever moves forward, so
//! deleted ids are not handed out again.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AdRepository, DbError};
use crate::models::{creation_timestamp, Ad, AdPatch, NewAd};

#[derive(Debug)]
struct Inner {
    ads: BTreeMap<i64, Ad>,
    next_id: i64,
}

/// Process-local ad repository
#[derive(Debug)]
pub struct MemoryAdRepo {
    inner: Mutex<Inner>,
}

impl MemoryAdRepo {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                ads: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    // Never held across an await point. Mutations are single insert/remove
    // calls, so a poisoned map is still consistent.
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryAdRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdRepository for MemoryAdRepo {
    async fn create(&self, new: NewAd) -> Result<Ad, DbError> {
        let mut inner = self.lock();

        let id = inner.next_id;
        inner.next_id += 1;

        let ad = Ad {
            id,
            title: new.title,
            description: new.description,
            owner: new.owner,
            created_at: creation_timestamp(),
        };
        inner.ads.insert(id, ad.clone());

        tracing::debug!(ad_id = id, "ad created");
        Ok(ad)
    }

    async fn get(&self, id: i64) -> Result<Ad, DbError> {
        self.lock()
            .ads
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::ad_not_found(id))
    }

    async fn update(&self, id: i64, patch: AdPatch) -> Result<Ad, DbError> {
        let mut inner = self.lock();
        let ad = inner
            .ads
            .get_mut(&id)
            .ok_or_else(|| DbError::ad_not_found(id))?;

        patch.apply_to(ad);

        tracing::debug!(ad_id = id, "ad updated");
        Ok(ad.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        if self.lock().ads.remove(&id).is_none() {
            return Err(DbError::ad_not_found(id));
        }

        tracing::debug!(ad_id = id, "ad deleted");
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_ad(title: &str) -> NewAd {
        NewAd {
            title: title.into(),
            description: "desc".into(),
            owner: "alice".into(),
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let repo = MemoryAdRepo::new();
        let a = repo.create(new_ad("a")).await.unwrap();
        let b = repo.create(new_ad("b")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn ids_not_reused_after_delete() {
        let repo = MemoryAdRepo::new();
        let a = repo.create(new_ad("a")).await.unwrap();
        let b = repo.create(new_ad("b")).await.unwrap();
        repo.delete(b.id).await.unwrap();
        repo.delete(a.id).await.unwrap();

        let c = repo.create(new_ad("c")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn get_returns_created_record() {
        let repo = MemoryAdRepo::new();
        let created = repo.create(new_ad("Bike")).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let repo = MemoryAdRepo::new();
        let created = repo.create(new_ad("Bike")).await.unwrap();

        let patch = AdPatch {
            description: Some("Red bike".into()),
            ..Default::default()
        };
        let updated = repo.update(created.id, patch).await.unwrap();

        assert_eq!(updated.description, "Red bike");
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.owner, created.owner);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(repo.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = MemoryAdRepo::new();
        let patch = AdPatch {
            title: Some("x".into()),
            ..Default::default()
        };
        let err = repo.update(42, patch).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "ad", .. }));
    }

    #[tokio::test]
    async fn always_ready() {
        let repo = MemoryAdRepo::new();
        assert_eq!(repo.store_name(), "memory");
        assert!(repo.ping().await.is_ok());
    }

    #[tokio::test]
    async fn delete_then_get_and_delete_fail() {
        let repo = MemoryAdRepo::new();
        let created = repo.create(new_ad("Bike")).await.unwrap();

        repo.delete(created.id).await.unwrap();

        assert!(matches!(
            repo.get(created.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            repo.delete(created.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
