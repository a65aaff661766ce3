//! In-memory post store - the default when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use pulse_core::domain::Post;
use pulse_core::error::StoreError;
use pulse_core::ports::{PostStore, Versioned};

/// In-memory store using a HashMap with an async RwLock.
///
/// Updates are compare-and-swap on the per-record version stamp, same
/// contract as the Postgres adapter. Note: data is lost on restart.
pub struct InMemoryPostStore {
    records: RwLock<HashMap<Uuid, Versioned<Post>>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Versioned<Post>>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&post.id) {
            return Err(StoreError::Duplicate);
        }
        records.insert(
            post.id,
            Versioned {
                value: post,
                version: 1,
            },
        );
        Ok(())
    }

    async fn update(&self, post: Post, expected_version: u64) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        // A record deleted mid-cycle also reads as a conflict: the
        // caller's retry loop re-fetches and reports NotFound itself.
        let Some(record) = records.get_mut(&post.id) else {
            return Err(StoreError::VersionConflict);
        };
        if record.version != expected_version {
            return Err(StoreError::VersionConflict);
        }
        record.value = post;
        record.version += 1;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().map(|r| r.value.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post::new(
            Uuid::new_v4(),
            "alice".to_owned(),
            "caption".to_owned(),
            vec!["url".to_owned()],
        )
    }

    #[tokio::test]
    async fn insert_then_find_round_trips_at_version_one() {
        let store = InMemoryPostStore::new();
        let p = post();
        store.insert(p.clone()).await.unwrap();

        let found = store.find_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(found.version, 1);
        assert_eq!(found.value.id, p.id);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryPostStore::new();
        let p = post();
        store.insert(p.clone()).await.unwrap();

        assert!(matches!(
            store.insert(p).await,
            Err(StoreError::Duplicate)
        ));
    }

    #[tokio::test]
    async fn update_bumps_version_and_stale_writes_conflict() {
        let store = InMemoryPostStore::new();
        let p = post();
        store.insert(p.clone()).await.unwrap();

        store.update(p.clone(), 1).await.unwrap();
        let found = store.find_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(found.version, 2);

        // Writing against the old stamp must fail.
        assert!(matches!(
            store.update(p, 1).await,
            Err(StoreError::VersionConflict)
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryPostStore::new();
        let p = post();
        store.insert(p.clone()).await.unwrap();

        store.delete(p.id).await.unwrap();
        store.delete(p.id).await.unwrap();
        assert!(store.find_by_id(p.id).await.unwrap().is_none());
    }
}
