//! Engagement service - owns the mutation contract for a post's like
//! set, comment list and share list.
//!
//! Safe under arbitrary interleavings against the same post id: every
//! operation rides the optimistic retry loop in [`super::mutate_post`],
//! per-post granularity only, no locks across unrelated posts.

use std::sync::Arc;

use uuid::Uuid;

use super::{Mutation, mutate_post};
use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::PostStore;

pub struct EngagementService {
    store: Arc<dyn PostStore>,
}

impl EngagementService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Like a post. Liking twice is a no-op, not an error: under
    /// concurrent duplicate calls the outcome is "union wins" - exactly
    /// one membership addition.
    pub async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        let added = mutate_post(self.store.as_ref(), post_id, |post: &mut Post| {
            if post.add_like(user_id) {
                Mutation::Apply(true)
            } else {
                Mutation::Skip(false)
            }
        })
        .await?;

        if added {
            tracing::info!(%post_id, %user_id, "post liked");
        }
        Ok(())
    }

    /// Remove a like. A no-op when the user never liked the post.
    pub async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        let removed = mutate_post(self.store.as_ref(), post_id, |post: &mut Post| {
            if post.remove_like(user_id) {
                Mutation::Apply(true)
            } else {
                Mutation::Skip(false)
            }
        })
        .await?;

        if removed {
            tracing::info!(%post_id, %user_id, "post unliked");
        }
        Ok(())
    }

    /// Append a comment and return its server-generated id.
    pub async fn comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        text: String,
    ) -> Result<Uuid, DomainError> {
        if text.is_empty() {
            return Err(DomainError::Validation(
                "comment text cannot be empty".to_owned(),
            ));
        }

        let comment_id = mutate_post(self.store.as_ref(), post_id, |post: &mut Post| {
            Mutation::Apply(post.add_comment(user_id, text.clone()))
        })
        .await?;

        tracing::info!(%post_id, %user_id, %comment_id, "comment added");
        Ok(comment_id)
    }

    /// Record a share to a destination tag.
    pub async fn share(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        shared_to: String,
    ) -> Result<(), DomainError> {
        mutate_post(self.store.as_ref(), post_id, |post: &mut Post| {
            post.add_share(user_id, shared_to.clone());
            Mutation::Apply(())
        })
        .await?;

        tracing::info!(%post_id, %user_id, %shared_to, "post shared");
        Ok(())
    }
}
