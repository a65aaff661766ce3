//! Application state - shared across all handlers.

use std::sync::Arc;

use pulse_core::ports::PostStore;
use pulse_core::services::{EngagementService, FeedService, PostService};
use pulse_infra::InMemoryPostStore;
use pulse_infra::store::DatabaseConfig;

#[cfg(feature = "postgres")]
use pulse_infra::PostgresPostStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub engagement: Arc<EngagementService>,
    pub feed: Arc<FeedService>,
    /// Name of the active store backend, reported by the health check.
    pub store_backend: &'static str,
}

impl AppState {
    /// Build the application state with the appropriate store backend.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (store, store_backend): (Arc<dyn PostStore>, &'static str) = {
            if let Some(config) = db_config {
                match PostgresPostStore::connect(config).await {
                    Ok(store) => (Arc::new(store), "postgres"),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (Arc::new(InMemoryPostStore::new()), "in-memory")
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
                (Arc::new(InMemoryPostStore::new()), "in-memory")
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (store, store_backend): (Arc<dyn PostStore>, &'static str) = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using the in-memory store");
            (Arc::new(InMemoryPostStore::new()), "in-memory")
        };

        tracing::info!(store = store_backend, "Application state initialized");

        Self {
            posts: Arc::new(PostService::new(store.clone())),
            engagement: Arc::new(EngagementService::new(store.clone())),
            feed: Arc::new(FeedService::new(store)),
            store_backend,
        }
    }
}
