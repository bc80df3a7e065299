//! Voting domain.
//!
//! # Data Flow
//! ```text
//! POST /vote body
//!     → ingest.rs (decode, check against VoteOptions, append one row)
//!
//! GET /counts
//!     → tally.rs (grouped row counts → one entry per option, zero-filled)
//! ```
//!
//! # Design Decisions
//! - The allowed set is an immutable value injected at startup
//! - The store is append-only; counts are always derived from rows
//! - Repeat voting from one client is accepted (no deduplication)

pub mod ingest;
pub mod options;
pub mod tally;

use serde::{Deserialize, Serialize};

pub use ingest::{cast_vote, VoteRequest};
pub use options::VoteOptions;
pub use tally::current_counts;

/// Number of stored votes for one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCount {
    pub team: String,
    pub count: i64,
}

impl TeamCount {
    pub fn new(team: impl Into<String>, count: i64) -> Self {
        Self {
            team: team.into(),
            count,
        }
    }
}
