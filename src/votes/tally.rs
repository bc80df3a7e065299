//! Count aggregation.

use std::collections::HashMap;

use super::{TeamCount, VoteOptions};
use crate::error::AppError;
use crate::store::VoteStore;

/// Fold grouped row counts into exactly one entry per allowed option.
///
/// Options without rows report zero. Rows for labels outside the allowed
/// set are dropped.
pub fn tally(options: &VoteOptions, grouped: Vec<TeamCount>) -> Vec<TeamCount> {
    let mut by_team: HashMap<String, i64> = grouped
        .into_iter()
        .map(|c| (c.team, c.count))
        .collect();

    options
        .iter()
        .map(|team| TeamCount::new(team, by_team.remove(team).unwrap_or(0)))
        .collect()
}

pub async fn current_counts(
    options: &VoteOptions,
    store: &dyn VoteStore,
) -> Result<Vec<TeamCount>, AppError> {
    let grouped = store.counts_by_team().await?;
    Ok(tally(options, grouped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn empty_store_reports_zero_for_every_option() {
        let counts = tally(&VoteOptions::default(), Vec::new());
        assert_eq!(
            counts,
            vec![TeamCount::new("australia", 0), TeamCount::new("england", 0)]
        );
    }

    #[test]
    fn order_follows_options_not_rows() {
        let grouped = vec![TeamCount::new("england", 4), TeamCount::new("australia", 9)];
        let counts = tally(&VoteOptions::default(), grouped);
        assert_eq!(
            counts,
            vec![TeamCount::new("australia", 9), TeamCount::new("england", 4)]
        );
    }

    #[test]
    fn rows_outside_the_allowed_set_are_dropped() {
        let grouped = vec![TeamCount::new("india", 3), TeamCount::new("england", 1)];
        let counts = tally(&VoteOptions::default(), grouped);
        assert_eq!(counts.len(), 2);
        assert!(counts.iter().all(|c| c.team != "india"));
    }

    #[tokio::test]
    async fn reads_through_the_store() {
        let store = MemoryStore::new();
        store.insert_vote("england").await.unwrap();

        let counts = current_counts(&VoteOptions::default(), &store).await.unwrap();
        assert_eq!(
            counts,
            vec![TeamCount::new("australia", 0), TeamCount::new("england", 1)]
        );
    }

    #[tokio::test]
    async fn store_failure_is_an_error() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(matches!(
            current_counts(&VoteOptions::default(), &store).await,
            Err(AppError::Store(_))
        ));
    }
}
