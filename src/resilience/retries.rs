//! Bounded fixed-interval retry.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Fixed-interval retry bounded by an overall deadline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Pause between attempts in milliseconds.
    pub interval_ms: u64,

    /// Give up once this many seconds have passed since the first attempt.
    pub deadline_secs: u64,
}

impl RetryPolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            deadline_secs: 30,
        }
    }
}

/// Run `probe` until it succeeds or the policy deadline passes.
///
/// Returns the number of attempts on success, or the last probe error.
/// The probe always runs at least once.
pub async fn wait_until_ready<F, Fut, E>(policy: &RetryPolicy, mut probe: F) -> Result<u32, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let give_up_at = Instant::now() + policy.deadline();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match probe().await {
            Ok(()) => return Ok(attempts),
            Err(e) if Instant::now() >= give_up_at => {
                tracing::error!(attempts, error = %e, deadline = ?policy.deadline(), "Giving up waiting for readiness");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(attempt = attempts, error = %e, retry_in = ?policy.interval(), "Not ready yet");
                tokio::time::sleep(policy.interval()).await;
            }
        }
    }
}
