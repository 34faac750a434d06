use crate::domain::models::repository::{Branch, Repository};
use async_trait::async_trait;
use thiserror::Error;

/// Classified outcome of a single GitHub call, so each caller can apply its
/// own policy to a 404 versus any other failure.
#[derive(Debug, Error)]
pub enum GitHubApiError {
    /// The requested resource does not exist upstream (HTTP 404).
    #[error("resource not found on GitHub")]
    NotFound,
    /// Any other non-2xx answer, with the body GitHub sent along.
    #[error("GitHub returned status {status}")]
    Status { status: u16, body: String },
    /// The call never produced a classifiable answer: connection, read or
    /// payload-decoding failure.
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait GitHubApi {
    async fn fetch_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, GitHubApiError>;
    async fn fetch_branches(&self, owner: &str, repo: &str)
        -> Result<Vec<Branch>, GitHubApiError>;
}
