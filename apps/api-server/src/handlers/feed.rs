//! Personalized feed handler.

use actix_web::{HttpResponse, web};

use pulse_shared::ApiResponse;
use pulse_shared::dto::{FeedQuery, PostResponse};

use super::posts::post_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/feed
pub async fn personalized_feed(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let entries = state
        .feed
        .personalized_feed(q.user_id, q.page.unwrap_or(0), q.page_size.unwrap_or(0))
        .await?;

    let posts: Vec<PostResponse> = entries
        .into_iter()
        .map(|entry| {
            let mut response = post_response(entry.post, None);
            response.liked_by_current_user = entry.liked_by_current_user;
            response
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}
