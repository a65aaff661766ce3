//! PostgreSQL post store.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectOptions, Database, DbConn, DbErr, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use pulse_core::domain::Post;
use pulse_core::error::StoreError;
use pulse_core::ports::{PostStore, Versioned};

use super::DatabaseConfig;
use super::entity::{self, Column, Entity as PostEntity};

/// Post store backed by PostgreSQL via SeaORM.
///
/// Conditional updates are a single `UPDATE ... WHERE id = ? AND
/// version = ?`; zero rows affected means another writer moved the
/// version stamp first.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Connect a pooled store from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let db = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "post database connected");
        Ok(Self::new(db))
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Versioned<Post>>, StoreError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, post: Post) -> Result<(), StoreError> {
        let active = entity::active_model(&post, 1);
        PostEntity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate") || err_str.contains("unique") {
                    StoreError::Duplicate
                } else {
                    map_db_err(e)
                }
            })?;
        Ok(())
    }

    async fn update(&self, post: Post, expected_version: u64) -> Result<(), StoreError> {
        let id = post.id;
        let mut active = entity::active_model(&post, expected_version as i64 + 1);
        active.id = ActiveValue::NotSet;

        let result = PostEntity::update_many()
            .set(active)
            .filter(Column::Id.eq(id))
            .filter(Column::Version.eq(expected_version as i64))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(StoreError::VersionConflict);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        // Zero rows affected is fine: delete is idempotent.
        PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let models = PostEntity::find().all(&self.db).await.map_err(map_db_err)?;
        Ok(models
            .into_iter()
            .map(|m| Versioned::<Post>::from(m).value)
            .collect())
    }
}

fn map_db_err(e: DbErr) -> StoreError {
    match &e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Connection(e.to_string()),
        _ => StoreError::Query(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::entity::{Comments, LikedBy, MediaUrls, Shares};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: Uuid, version: i64) -> entity::Model {
        let now = chrono::Utc::now();
        entity::Model {
            id,
            author_id: Uuid::new_v4(),
            author_name: "alice".to_owned(),
            caption: "caption".to_owned(),
            media_urls: MediaUrls(vec!["url".to_owned()]),
            liked_by_user_ids: LikedBy(vec![]),
            likes: 0,
            comments: Comments(vec![]),
            shares: Shares(vec![]),
            share_count: 0,
            created_at: now.into(),
            updated_at: now.into(),
            version,
        }
    }

    #[tokio::test]
    async fn find_by_id_carries_the_version_stamp() {
        let post_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(post_id, 7)]])
            .into_connection();

        let store = PostgresPostStore::new(db);
        let found = store.find_by_id(post_id).await.unwrap().unwrap();

        assert_eq!(found.version, 7);
        assert_eq!(found.value.id, post_id);
    }

    #[tokio::test]
    async fn zero_rows_affected_update_is_a_version_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let store = PostgresPostStore::new(db);
        let versioned: Versioned<Post> = model(Uuid::new_v4(), 1).into();

        assert!(matches!(
            store.update(versioned.value, 1).await,
            Err(StoreError::VersionConflict)
        ));
    }

    #[tokio::test]
    async fn matching_version_update_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let store = PostgresPostStore::new(db);
        let versioned: Versioned<Post> = model(Uuid::new_v4(), 3).into();

        store.update(versioned.value, 3).await.unwrap();
    }

    #[tokio::test]
    async fn deleting_an_absent_id_is_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let store = PostgresPostStore::new(db);
        store.delete(Uuid::new_v4()).await.unwrap();
    }
}
