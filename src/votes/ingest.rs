//! Vote ingestion: decode, validate, append.

use serde::{Deserialize, Serialize};
use tracing::Instrument;

use super::VoteOptions;
use crate::error::AppError;
use crate::observability::metrics;
use crate::store::VoteStore;

/// Body of `POST /vote`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VoteRequest {
    /// A missing field decodes to `""`, which no option set allows.
    #[serde(default)]
    pub team: String,
}

impl VoteRequest {
    pub fn decode(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Rejecting undecodable vote payload");
            AppError::MalformedPayload
        })
    }
}

/// Validate a raw `POST /vote` body and append one row.
///
/// Nothing is written unless the payload decodes and names an allowed
/// option. Store errors are returned as-is; the caller may retry.
pub async fn cast_vote(
    options: &VoteOptions,
    store: &dyn VoteStore,
    body: &[u8],
) -> Result<(), AppError> {
    let request = match VoteRequest::decode(body) {
        Ok(request) => request,
        Err(e) => {
            metrics::record_rejected_vote("malformed");
            return Err(e);
        }
    };

    if !options.contains(&request.team) {
        tracing::debug!(team = %request.team, "Rejecting vote for unknown team");
        metrics::record_rejected_vote("invalid_option");
        return Err(AppError::InvalidOption(request.team));
    }

    let span = tracing::info_span!("cast-vote", team = %request.team);
    store.insert_vote(&request.team).instrument(span).await?;

    metrics::record_vote(&request.team);
    tracing::info!(team = %request.team, "Vote recorded");
    Ok(())
}
