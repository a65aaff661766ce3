//! Post entity for SeaORM.
//!
//! Engagement collections are stored as JSONB alongside the post row,
//! so a single conditional UPDATE carries the whole delta (collection +
//! counter + timestamp) atomically. The `version` column is the
//! optimistic-concurrency stamp.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use pulse_core::domain::{Comment, Post, Share};
use pulse_core::ports::Versioned;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MediaUrls(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LikedBy(pub Vec<Uuid>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Comments(pub Vec<Comment>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Shares(pub Vec<Share>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    #[sea_orm(column_type = "Text")]
    pub caption: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub media_urls: MediaUrls,
    #[sea_orm(column_type = "JsonBinary")]
    pub liked_by_user_ids: LikedBy,
    pub likes: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Comments,
    #[sea_orm(column_type = "JsonBinary")]
    pub shares: Shares,
    pub share_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain Post plus its version stamp.
impl From<Model> for Versioned<Post> {
    fn from(model: Model) -> Self {
        Versioned {
            version: model.version as u64,
            value: Post {
                id: model.id,
                author_id: model.author_id,
                author_name: model.author_name,
                caption: model.caption,
                media_urls: model.media_urls.0,
                liked_by_user_ids: model.liked_by_user_ids.0,
                likes: model.likes as u32,
                comments: model.comments.0,
                shares: model.shares.0,
                share_count: model.share_count as u32,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            },
        }
    }
}

/// Build an ActiveModel writing the post at the given version.
pub fn active_model(post: &Post, version: i64) -> ActiveModel {
    ActiveModel {
        id: Set(post.id),
        author_id: Set(post.author_id),
        author_name: Set(post.author_name.clone()),
        caption: Set(post.caption.clone()),
        media_urls: Set(MediaUrls(post.media_urls.clone())),
        liked_by_user_ids: Set(LikedBy(post.liked_by_user_ids.clone())),
        likes: Set(post.likes as i32),
        comments: Set(Comments(post.comments.clone())),
        shares: Set(Shares(post.shares.clone())),
        share_count: Set(post.share_count as i32),
        created_at: Set(post.created_at.into()),
        updated_at: Set(post.updated_at.into()),
        version: Set(version),
    }
}
