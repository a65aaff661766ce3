use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::StoreError;

/// A record paired with the optimistic-concurrency stamp it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

/// Post store port - durable keyed storage with per-record
/// compare-and-swap updates.
///
/// `update` must apply only when the stored version still equals
/// `expected_version`, and report [`StoreError::VersionConflict`]
/// otherwise. That stamp is the engine's sole concurrency primitive:
/// services re-read before every mutation and retry on conflict.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Read a post together with its current version stamp.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Versioned<Post>>, StoreError>;

    /// Insert a new post at version 1. Fails with
    /// [`StoreError::Duplicate`] when the id is already taken.
    async fn insert(&self, post: Post) -> Result<(), StoreError>;

    /// Conditionally overwrite a post, bumping its version.
    async fn update(&self, post: Post, expected_version: u64) -> Result<(), StoreError>;

    /// Remove a post. Deleting an absent id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Unordered full scan. Filtering and ordering are the caller's job.
    async fn find_all(&self) -> Result<Vec<Post>, StoreError>;
}
