use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment appended to a post. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A share event. `shared_to` is a free-form destination tag,
/// e.g. "feed" or "private_message".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub user_id: Uuid,
    pub shared_at: DateTime<Utc>,
    pub shared_to: String,
}

/// Post entity - the central object of the feed engine.
///
/// The `likes` and `share_count` counters are materialized views of
/// `liked_by_user_ids` and `shares`. They are only ever written by the
/// mutation methods below, which recompute them from the backing
/// collection in the same call, so they cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub caption: String,
    /// Display order of attached media, preserved verbatim.
    pub media_urls: Vec<String>,
    /// Users who liked the post, in first-like order, duplicate-free.
    pub liked_by_user_ids: Vec<Uuid>,
    pub likes: u32,
    /// Oldest first, append-only.
    pub comments: Vec<Comment>,
    /// Append-only.
    pub shares: Vec<Share>,
    pub share_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with empty engagement state.
    pub fn new(
        author_id: Uuid,
        author_name: String,
        caption: String,
        media_urls: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            author_name,
            caption,
            media_urls,
            liked_by_user_ids: Vec::new(),
            likes: 0,
            comments: Vec::new(),
            shares: Vec::new(),
            share_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a like from `user_id`. Returns `false` (leaving the post
    /// untouched) when the user already liked it - a like is idempotent.
    pub fn add_like(&mut self, user_id: Uuid) -> bool {
        if self.liked_by_user_ids.contains(&user_id) {
            return false;
        }
        self.liked_by_user_ids.push(user_id);
        self.likes = self.liked_by_user_ids.len() as u32;
        self.touch();
        true
    }

    /// Remove a like from `user_id`. Returns `false` when the user never
    /// liked the post. The counter is recomputed from the set, so it can
    /// never go negative.
    pub fn remove_like(&mut self, user_id: Uuid) -> bool {
        let Some(pos) = self.liked_by_user_ids.iter().position(|u| *u == user_id) else {
            return false;
        };
        self.liked_by_user_ids.remove(pos);
        self.likes = self.liked_by_user_ids.len() as u32;
        self.touch();
        true
    }

    /// Append a comment and return its server-generated id.
    pub fn add_comment(&mut self, user_id: Uuid, text: String) -> Uuid {
        let comment = Comment {
            id: Uuid::new_v4(),
            user_id,
            text,
            created_at: Utc::now(),
        };
        let id = comment.id;
        self.comments.push(comment);
        self.touch();
        id
    }

    /// Append a share event and bump the share counter.
    pub fn add_share(&mut self, user_id: Uuid, shared_to: String) {
        self.shares.push(Share {
            user_id,
            shared_at: Utc::now(),
            shared_to,
        });
        self.share_count = self.shares.len() as u32;
        self.touch();
    }

    /// Replace caption and media verbatim. Engagement state is untouched.
    pub fn replace_content(&mut self, caption: String, media_urls: Vec<String>) {
        self.caption = caption;
        self.media_urls = media_urls;
        self.touch();
    }

    pub fn liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by_user_ids.contains(&user_id)
    }

    /// Engagement score used for feed ordering.
    pub fn engagement_score(&self) -> u64 {
        self.likes as u64 + self.comments.len() as u64 + self.share_count as u64
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post::new(
            Uuid::new_v4(),
            "alice".to_owned(),
            "sunset".to_owned(),
            vec!["https://cdn/p1.jpg".to_owned()],
        )
    }

    #[test]
    fn like_is_idempotent() {
        let mut p = post();
        let user = Uuid::new_v4();

        assert!(p.add_like(user));
        assert!(!p.add_like(user));

        assert_eq!(p.likes, 1);
        assert_eq!(p.liked_by_user_ids, vec![user]);
    }

    #[test]
    fn unlike_without_like_is_a_noop() {
        let mut p = post();
        let liker = Uuid::new_v4();
        p.add_like(liker);

        assert!(!p.remove_like(Uuid::new_v4()));
        assert_eq!(p.likes, 1);
        assert_eq!(p.liked_by_user_ids, vec![liker]);
    }

    #[test]
    fn counters_track_collections() {
        let mut p = post();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        p.add_like(a);
        p.add_like(b);
        p.remove_like(a);
        p.add_share(a, "feed".to_owned());
        p.add_share(b, "private_message".to_owned());

        assert_eq!(p.likes as usize, p.liked_by_user_ids.len());
        assert_eq!(p.share_count as usize, p.shares.len());
        assert_eq!(p.likes, 1);
        assert_eq!(p.share_count, 2);
    }

    #[test]
    fn comments_keep_insertion_order() {
        let mut p = post();
        let user = Uuid::new_v4();

        p.add_comment(user, "first".to_owned());
        p.add_comment(user, "second".to_owned());

        let texts: Vec<&str> = p.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn engagement_score_sums_all_signals() {
        let mut p = post();
        let user = Uuid::new_v4();

        p.add_like(user);
        p.add_comment(user, "nice".to_owned());
        p.add_share(user, "feed".to_owned());

        assert_eq!(p.engagement_score(), 3);
    }

    #[test]
    fn mutations_bump_updated_at() {
        let mut p = post();
        let before = p.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));

        p.add_like(Uuid::new_v4());
        assert!(p.updated_at > before);
    }
}
