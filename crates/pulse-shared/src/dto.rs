//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a post. Author identity is resolved by the
/// upstream auth layer and passed through here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author_id: Uuid,
    pub author_name: String,
    pub caption: String,
    pub media_urls: Vec<String>,
}

/// Request to replace a post's caption and media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub caption: String,
    pub media_urls: Vec<String>,
}

/// Request to like or unlike a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub user_id: Uuid,
}

/// Request to comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub user_id: Uuid,
    pub text: String,
}

/// Request to share a post to a destination tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    pub user_id: Uuid,
    pub shared_to: String,
}

/// A comment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A post materialized for one caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub caption: String,
    pub media_urls: Vec<String>,
    pub likes: u32,
    pub comments: Vec<CommentResponse>,
    pub share_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub liked_by_current_user: bool,
}

/// Response to a newly appended comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreatedResponse {
    pub comment_id: Uuid,
}

/// Query parameters of the personalized feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedQuery {
    pub user_id: Uuid,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Query parameters of post search. Filters are ANDed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub author_id: Option<Uuid>,
    pub caption: Option<String>,
    pub author_name: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// One search page plus the pre-pagination total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: u64,
    pub posts: Vec<PostResponse>,
}
