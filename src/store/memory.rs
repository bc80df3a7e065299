//! In-process vote store.
//!
//! Used by the test suites and for running the HTTP surface without a
//! database. A failure switch makes every operation return
//! [`StoreError::Unavailable`] so error paths can be exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{StoreError, VoteStore};
use crate::votes::TeamCount;

#[derive(Debug, Clone)]
pub struct StoredVote {
    pub id: i64,
    pub team: String,
    pub created_at: SystemTime,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredVote>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }

    /// Snapshot of all rows in insertion order.
    pub async fn rows(&self) -> Vec<StoredVote> {
        self.rows.lock().await.clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl VoteStore for MemoryStore {
    async fn insert_vote(&self, team: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().await;
        let id = rows.len() as i64 + 1;
        rows.push(StoredVote {
            id,
            team: team.to_string(),
            created_at: SystemTime::now(),
        });
        Ok(())
    }

    async fn counts_by_team(&self) -> Result<Vec<TeamCount>, StoreError> {
        self.check()?;
        let rows = self.rows.lock().await;
        let mut grouped: HashMap<&str, i64> = HashMap::new();
        for row in rows.iter() {
            *grouped.entry(row.team.as_str()).or_default() += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|(team, count)| TeamCount::new(team, count))
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
