//! # Pulse Infrastructure
//!
//! Concrete implementations of the ports defined in `pulse-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM

pub mod store;

// Re-exports - In-Memory
pub use store::{DatabaseConfig, InMemoryPostStore};

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use store::PostgresPostStore;
