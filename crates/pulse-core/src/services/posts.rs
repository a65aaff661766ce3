//! Post lifecycle - creation, update, deletion and search.

use std::sync::Arc;

use uuid::Uuid;

use super::feed::normalize_page;
use super::{Mutation, mutate_post};
use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::PostStore;

/// Search filters, ANDed together. `None` means "don't care".
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub author_id: Option<Uuid>,
    /// Case-insensitive substring on the caption.
    pub caption: Option<String>,
    /// Case-insensitive substring on the author name.
    pub author_name: Option<String>,
}

impl SearchFilter {
    fn matches(&self, post: &Post) -> bool {
        if let Some(author_id) = self.author_id
            && post.author_id != author_id
        {
            return false;
        }
        if let Some(needle) = &self.caption
            && !contains_ci(&post.caption, needle)
        {
            return false;
        }
        if let Some(needle) = &self.author_name
            && !contains_ci(&post.author_name, needle)
        {
            return false;
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// One page of hits plus the pre-pagination total for the client's pager.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub total: usize,
    pub posts: Vec<Post>,
}

pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Create a post with empty engagement state. Validation runs
    /// before any store call, so a rejected request persists nothing.
    pub async fn create(
        &self,
        author_id: Uuid,
        author_name: String,
        caption: String,
        media_urls: Vec<String>,
    ) -> Result<Post, DomainError> {
        validate_content(&caption, &media_urls)?;

        let post = Post::new(author_id, author_name, caption, media_urls);
        self.store.insert(post.clone()).await?;

        tracing::info!(post_id = %post.id, author_id = %post.author_id, "post created");
        Ok(post)
    }

    pub async fn get_by_id(&self, post_id: Uuid) -> Result<Post, DomainError> {
        match self.store.find_by_id(post_id).await? {
            Some(versioned) => Ok(versioned.value),
            None => Err(DomainError::NotFound {
                entity_type: "post",
                id: post_id,
            }),
        }
    }

    /// Replace caption and media verbatim (no merge). Engagement fields
    /// are never touched by update.
    pub async fn update(
        &self,
        post_id: Uuid,
        caption: String,
        media_urls: Vec<String>,
    ) -> Result<Post, DomainError> {
        validate_content(&caption, &media_urls)?;

        let updated = mutate_post(self.store.as_ref(), post_id, |post: &mut Post| {
            post.replace_content(caption.clone(), media_urls.clone());
            Mutation::Apply(post.clone())
        })
        .await?;

        tracing::info!(%post_id, "post updated");
        Ok(updated)
    }

    /// Delete a post. Deleting an absent id is not an error
    /// (at-most-once delete semantics).
    pub async fn delete(&self, post_id: Uuid) -> Result<(), DomainError> {
        self.store.delete(post_id).await?;
        tracing::info!(%post_id, "post deleted");
        Ok(())
    }

    /// Filtered scan sorted by creation time, newest first.
    pub async fn search(
        &self,
        filter: &SearchFilter,
        page: i64,
        size: i64,
    ) -> Result<SearchResult, DomainError> {
        let mut posts = self.store.find_all().await?;
        posts.retain(|post| filter.matches(post));
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        let total = posts.len();
        let (page, size) = normalize_page(page, size);
        let posts: Vec<Post> = posts
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect();

        Ok(SearchResult { total, posts })
    }
}

fn validate_content(caption: &str, media_urls: &[String]) -> Result<(), DomainError> {
    if caption.is_empty() {
        return Err(DomainError::Validation("caption cannot be empty".to_owned()));
    }
    if media_urls.is_empty() {
        return Err(DomainError::Validation(
            "at least one media url is required".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_by(author_name: &str, caption: &str) -> Post {
        Post::new(
            Uuid::new_v4(),
            author_name.to_owned(),
            caption.to_owned(),
            vec!["url".to_owned()],
        )
    }

    #[test]
    fn empty_caption_is_rejected() {
        assert!(matches!(
            validate_content("", &["url".to_owned()]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn missing_media_is_rejected() {
        assert!(matches!(
            validate_content("caption", &[]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn substring_filters_are_case_insensitive() {
        let post = post_by("Alice", "Golden Gate at dusk");

        let filter = SearchFilter {
            caption: Some("golden".to_owned()),
            author_name: Some("ALICE".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&post));

        let miss = SearchFilter {
            caption: Some("bridge".to_owned()),
            ..Default::default()
        };
        assert!(!miss.matches(&post));
    }

    #[test]
    fn filters_are_anded() {
        let post = post_by("Alice", "hello");

        let filter = SearchFilter {
            author_id: Some(Uuid::new_v4()), // wrong author
            caption: Some("hello".to_owned()),
            ..Default::default()
        };
        assert!(!filter.matches(&post));

        let filter = SearchFilter {
            author_id: Some(post.author_id),
            caption: Some("hello".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&post));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(SearchFilter::default().matches(&post_by("Bob", "anything")));
    }
}
