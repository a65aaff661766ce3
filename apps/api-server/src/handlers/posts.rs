//! Post lifecycle and engagement handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use pulse_core::domain::Post;
use pulse_core::services::SearchFilter;
use pulse_shared::ApiResponse;
use pulse_shared::dto::{
    CommentCreatedResponse, CommentRequest, CommentResponse, CreatePostRequest, LikeRequest,
    PostResponse, SearchQuery, SearchResponse, ShareRequest, UpdatePostRequest,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Materialize a post for one caller. `current_user` only drives the
/// `liked_by_current_user` flag.
pub(super) fn post_response(post: Post, current_user: Option<Uuid>) -> PostResponse {
    PostResponse {
        liked_by_current_user: current_user.map(|u| post.liked_by(u)).unwrap_or(false),
        id: post.id,
        author_id: post.author_id,
        author_name: post.author_name,
        caption: post.caption,
        media_urls: post.media_urls,
        likes: post.likes,
        comments: post
            .comments
            .into_iter()
            .map(|c| CommentResponse {
                id: c.id,
                user_id: c.user_id,
                text: c.text,
                created_at: c.created_at,
            })
            .collect(),
        share_count: post.share_count,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(req.author_id, req.author_name, req.caption, req.media_urls)
        .await?;

    let author = post.author_id;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post, Some(author)))))
}

/// GET /api/posts/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post, None))))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .update(path.into_inner(), req.caption, req.media_urls)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post, None))))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posts
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let filter = SearchFilter {
        author_id: q.author_id,
        caption: q.caption,
        author_name: q.author_name,
    };

    let result = state
        .posts
        .search(&filter, q.page.unwrap_or(0), q.size.unwrap_or(0))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(SearchResponse {
        total: result.total as u64,
        posts: result
            .posts
            .into_iter()
            .map(|p| post_response(p, None))
            .collect(),
    })))
}

/// POST /api/posts/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<LikeRequest>,
) -> AppResult<HttpResponse> {
    state
        .engagement
        .like(path.into_inner(), body.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}

/// POST /api/posts/{id}/unlike
pub async fn unlike(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<LikeRequest>,
) -> AppResult<HttpResponse> {
    state
        .engagement
        .unlike(path.into_inner(), body.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}

/// POST /api/posts/{id}/comments
pub async fn comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let comment_id = state
        .engagement
        .comment(path.into_inner(), req.user_id, req.text)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(CommentCreatedResponse { comment_id })))
}

/// POST /api/posts/{id}/shares
pub async fn share(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ShareRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    state
        .engagement
        .share(path.into_inner(), req.user_id, req.shared_to)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}
