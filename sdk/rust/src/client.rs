use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteRequest {
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCount {
    pub team: String,
    pub count: i64,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl SdkError {
    /// Status code returned by the server, if the request got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SdkError::Http(e) => e.status(),
            SdkError::Status { status, .. } => Some(*status),
        }
    }
}

pub struct VoteClient {
    client: Client,
    base_url: String,
}

impl VoteClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (timeouts, proxy settings).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe. Returns the plain-text body.
    pub async fn health(&self) -> Result<String, SdkError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        let resp = check(resp).await?;
        Ok(resp.text().await?)
    }

    /// Cast a single vote for `team`.
    pub async fn cast_vote(&self, team: &str) -> Result<(), SdkError> {
        let resp = self
            .client
            .post(self.url("/vote"))
            .json(&VoteRequest { team: team.to_string() })
            .send()
            .await?;

        check(resp).await?;
        Ok(())
    }

    /// Current per-team counts, in the server's configured order.
    pub async fn counts(&self) -> Result<Vec<TeamCount>, SdkError> {
        let resp = self.client.get(self.url("/counts")).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn check(resp: Response) -> Result<Response, SdkError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(SdkError::Status {
        status,
        body: body.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = VoteClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/counts"), "http://localhost:8080/counts");
    }

    #[test]
    fn vote_request_serializes_team_field() {
        let body = serde_json::to_string(&VoteRequest { team: "england".into() }).unwrap();
        assert_eq!(body, r#"{"team":"england"}"#);
    }
}
