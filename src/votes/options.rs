//! The fixed set of choices a vote may select.

use serde::{Deserialize, Serialize};

/// Ordered, immutable list of allowed option labels.
///
/// Order is significant: it is the order `/counts` reports in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteOptions(Vec<String>);

impl VoteOptions {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Parse a comma separated list such as `australia,england`.
    ///
    /// Surrounding whitespace is trimmed and a trailing comma is tolerated.
    /// Blank entries in the middle are kept so validation can report them.
    pub fn parse_list(raw: &str) -> Self {
        let mut labels: Vec<String> = raw.split(',').map(|s| s.trim().to_string()).collect();
        if labels.last().is_some_and(|s| s.is_empty()) {
            labels.pop();
        }
        Self(labels)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for VoteOptions {
    fn default() -> Self {
        Self::new(["australia", "england"])
    }
}
