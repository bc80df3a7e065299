//! Vote persistence.
//!
//! # Data Flow
//! ```text
//! ingest  → VoteStore::insert_vote   (one INSERT, append-only)
//! tally   → VoteStore::counts_by_team (SELECT team, COUNT(*) ... GROUP BY team)
//! startup → VoteStore::ping          (readiness probe)
//! ```
//!
//! # Design Decisions
//! - One statement per request; no multi-statement transactions
//! - Locking and isolation are left to the database
//! - No update or delete path exists

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::votes::TeamCount;

pub use memory::MemoryStore;
pub use postgres::PgVoteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only vote storage.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Append one vote row for `team`.
    async fn insert_vote(&self, team: &str) -> Result<(), StoreError>;

    /// Row counts grouped by team. Teams with no rows are absent.
    async fn counts_by_team(&self) -> Result<Vec<TeamCount>, StoreError>;

    /// Cheap round trip used to decide whether the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
