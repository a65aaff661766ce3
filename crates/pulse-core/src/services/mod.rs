//! Application services - the transport-agnostic operation surface of
//! the engine: post lifecycle, engagement mutations, feed ranking.

mod engagement;
mod feed;
mod posts;

pub use engagement::EngagementService;
pub use feed::{DEFAULT_PAGE_SIZE, FeedEntry, FeedService};
pub use posts::{PostService, SearchFilter, SearchResult};

use uuid::Uuid;

use crate::domain::Post;
use crate::error::{DomainError, StoreError};
use crate::ports::PostStore;

/// Retry budget for optimistic-concurrency conflicts on one call.
const MAX_RETRIES: u32 = 5;

/// Outcome of applying a delta to a freshly read post.
enum Mutation<R> {
    /// Persist the mutated post and return the value.
    Apply(R),
    /// Nothing changed; skip the write and return the value.
    Skip(R),
}

/// Read-modify-write cycle with bounded optimistic retries.
///
/// Every attempt re-reads the current record so the delta is applied to
/// the latest state; a [`StoreError::VersionConflict`] means another
/// writer got in between and the whole cycle repeats. When the budget
/// runs out the caller gets [`DomainError::Conflict`] and can retry the
/// operation as a whole.
async fn mutate_post<R>(
    store: &dyn PostStore,
    post_id: Uuid,
    apply: impl Fn(&mut Post) -> Mutation<R>,
) -> Result<R, DomainError> {
    for attempt in 0..MAX_RETRIES {
        let Some(current) = store.find_by_id(post_id).await? else {
            return Err(DomainError::NotFound {
                entity_type: "post",
                id: post_id,
            });
        };

        let mut post = current.value;
        let result = match apply(&mut post) {
            Mutation::Apply(r) => r,
            Mutation::Skip(r) => return Ok(r),
        };

        match store.update(post, current.version).await {
            Ok(()) => return Ok(result),
            Err(StoreError::VersionConflict) => {
                tracing::debug!(%post_id, attempt, "stale read detected, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(DomainError::Conflict(format!(
        "post {post_id} still contended after {MAX_RETRIES} attempts"
    )))
}
