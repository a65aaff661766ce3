//! Feed ranker - deterministic engagement-ordered feed.
//!
//! The ranking is recomputed per request over a full scan, which holds
//! up while the corpus fits in memory. At production scale this is the
//! piece to swap for an incrementally maintained ranked index (e.g.
//! score buckets updated on each engagement mutation).

use std::cmp::Ordering;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::PostStore;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A ranked post materialized for one caller.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub post: Post,
    /// Whether the requesting user liked this post. The only place
    /// caller identity shapes the output - it never affects ranking.
    pub liked_by_current_user: bool,
}

pub struct FeedService {
    store: Arc<dyn PostStore>,
}

impl FeedService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Rank all posts by engagement and return the requested page.
    /// A page past the end is an empty list, not an error.
    pub async fn personalized_feed(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<FeedEntry>, DomainError> {
        let mut posts = self.store.find_all().await?;
        posts.sort_by(rank_order);

        let (page, size) = normalize_page(page, page_size);
        let entries: Vec<FeedEntry> = posts
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .map(|post| FeedEntry {
                liked_by_current_user: post.liked_by(user_id),
                post,
            })
            .collect();

        tracing::debug!(%user_id, page, size, returned = entries.len(), "feed page served");
        Ok(entries)
    }
}

/// Score descending, then newest first, then id as a stable fallback so
/// exact ties rank identically on every call.
pub(crate) fn rank_order(a: &Post, b: &Post) -> Ordering {
    b.engagement_score()
        .cmp(&a.engagement_score())
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Normalize caller-supplied pagination: zero or negative values fall
/// back to the first page of ten.
pub(crate) fn normalize_page(page: i64, page_size: i64) -> (usize, usize) {
    let page = if page > 0 { page as usize } else { 0 };
    let size = if page_size > 0 {
        page_size as usize
    } else {
        DEFAULT_PAGE_SIZE
    };
    (page, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn post_with_score(likes: u32, age_secs: i64) -> Post {
        let mut p = Post::new(
            Uuid::new_v4(),
            "author".to_owned(),
            "caption".to_owned(),
            vec!["url".to_owned()],
        );
        for _ in 0..likes {
            p.add_like(Uuid::new_v4());
        }
        p.created_at = Utc::now() - Duration::seconds(age_secs);
        p
    }

    #[test]
    fn higher_score_ranks_first() {
        let high = post_with_score(5, 100);
        let low = post_with_score(3, 0);

        assert_eq!(rank_order(&high, &low), Ordering::Less);
        assert_eq!(rank_order(&low, &high), Ordering::Greater);
    }

    #[test]
    fn tied_score_prefers_newer_post() {
        let newer = post_with_score(5, 10);
        let older = post_with_score(5, 3600);

        assert_eq!(rank_order(&newer, &older), Ordering::Less);
    }

    #[test]
    fn exact_tie_falls_back_to_id_deterministically() {
        let mut a = post_with_score(2, 50);
        let mut b = post_with_score(2, 50);
        // Force identical timestamps so only the id breaks the tie.
        b.created_at = a.created_at;

        let first = rank_order(&a, &b);
        assert_eq!(first, rank_order(&a, &b));
        assert_eq!(first, rank_order(&b, &a).reverse());

        // Swapping the contents swaps the outcome: the order depends on
        // the ids, not argument position.
        std::mem::swap(&mut a, &mut b);
        assert_eq!(rank_order(&a, &b), first.reverse());
    }

    #[test]
    fn pagination_defaults_kick_in_for_non_positive_input() {
        assert_eq!(normalize_page(-1, 0), (0, DEFAULT_PAGE_SIZE));
        assert_eq!(normalize_page(0, -5), (0, DEFAULT_PAGE_SIZE));
        assert_eq!(normalize_page(2, 25), (2, 25));
    }
}
