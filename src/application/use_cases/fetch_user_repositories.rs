use crate::domain::external_apis::github::{GitHubApi, GitHubApiError};
use crate::domain::models::repository::Repository;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use thiserror::Error;

/// Failure of the primary repository lookup. Branch fetches never produce
/// one of these; they degrade to empty branch lists instead. The `Display`
/// strings are the exact messages the HTTP boundary sends back.
#[derive(Debug, Error, PartialEq)]
pub enum FetchUserRepositoriesError {
    #[error("Username not found: {0}")]
    UsernameNotFound(String),
    #[error("Error fetching repositories for username: {username}")]
    UpstreamFailure { username: String, status: u16 },
}

#[async_trait]
pub trait FetchUserRepositoriesUseCase {
    async fn execute(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, FetchUserRepositoriesError>;
}

pub struct FetchUserRepositoriesInteractor<G: GitHubApi + Send + Sync + 'static> {
    github_api: Arc<G>,
}

impl<G: GitHubApi + Send + Sync + 'static> FetchUserRepositoriesInteractor<G> {
    pub fn new(github_api: Arc<G>) -> Self {
        Self { github_api }
    }
}

#[async_trait]
impl<G: GitHubApi + Send + Sync + 'static> FetchUserRepositoriesUseCase
    for FetchUserRepositoriesInteractor<G>
{
    #[tracing::instrument(name = "FetchUserRepositoriesInteractor::execute", skip(self))]
    async fn execute(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, FetchUserRepositoriesError> {
        let repositories = self
            .github_api
            .fetch_repositories(username)
            .await
            .map_err(|source| lookup_failure(username, source))?;

        let original_repositories: Vec<Repository> = repositories
            .into_iter()
            .filter(|repository| !repository.fork)
            .collect();

        tracing::info!(
            "Found {} repositories for username: {}",
            original_repositories.len(),
            username
        );

        // One concurrent branch fetch per surviving repository; completion
        // order is arbitrary but join_all keeps the filtered order.
        let fetches = original_repositories
            .into_iter()
            .map(|mut repository| async move {
                match self
                    .github_api
                    .fetch_branches(&repository.owner.login, &repository.name)
                    .await
                {
                    Ok(branches) => repository.branches = branches,
                    Err(error) => {
                        tracing::warn!(
                            "Failed to fetch branches for {}/{}, attaching none: {}",
                            repository.owner.login,
                            repository.name,
                            error
                        );
                        repository.branches = Vec::new();
                    }
                }

                repository
            });

        Ok(join_all(fetches).await)
    }
}

fn lookup_failure(username: &str, source: GitHubApiError) -> FetchUserRepositoriesError {
    match source {
        GitHubApiError::NotFound => {
            FetchUserRepositoriesError::UsernameNotFound(username.to_owned())
        }
        GitHubApiError::Status { status, body } => {
            tracing::error!(
                "GitHub answered {} listing repositories for {}: {}",
                status,
                username,
                body
            );
            FetchUserRepositoriesError::UpstreamFailure {
                username: username.to_owned(),
                status,
            }
        }
        GitHubApiError::Transport(source) => {
            // No upstream status exists for these, so none can be propagated.
            tracing::error!("Repository listing request for {} failed: {}", username, source);
            FetchUserRepositoriesError::UpstreamFailure {
                username: username.to_owned(),
                status: 500,
            }
        }
    }
}
