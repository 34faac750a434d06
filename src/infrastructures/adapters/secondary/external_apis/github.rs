use crate::domain::external_apis::github::{GitHubApi, GitHubApiError};
use crate::domain::models::repository::{Branch, Commit, Owner, Repository};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
struct GitHubRepositoryResponse {
    name: String,
    owner: GitHubOwnerResponse,
    fork: bool,
}

#[derive(Deserialize, Debug, Clone)]
struct GitHubOwnerResponse {
    login: String,
}

#[derive(Deserialize, Debug, Clone)]
struct GitHubBranchResponse {
    name: String,
    commit: GitHubCommitResponse,
}

#[derive(Deserialize, Debug, Clone)]
struct GitHubCommitResponse {
    sha: String,
}

pub struct GitHubApiAdapter {
    client: Client,
    base_url: String,
}

impl GitHubApiAdapter {
    /// Builds a client with the fixed GitHub header set (auth, accept, API
    /// version) installed once; individual requests never re-derive them.
    pub fn new(base_url: String, github_token: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("bearer {github_token}"))
                .context("GitHub token is not a valid header value")?,
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("github-repos-rust-app"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build the GitHub HTTP client")?;

        Ok(Self { client, base_url })
    }

    async fn classify_response<T>(response: Response) -> Result<T, GitHubApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GitHubApiError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await?;
            return Err(GitHubApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl GitHubApi for GitHubApiAdapter {
    #[tracing::instrument(name = "GitHubApiAdapter::fetch_repositories", skip(self))]
    async fn fetch_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, GitHubApiError> {
        let url = format!("{}/users/{username}/repos", self.base_url);

        let response = self.client.get(&url).send().await?;
        let response_items: Vec<GitHubRepositoryResponse> =
            Self::classify_response(response).await?;

        let repositories = response_items
            .into_iter()
            .map(|repo_res| Repository {
                name: repo_res.name,
                owner: Owner {
                    login: repo_res.owner.login,
                },
                fork: repo_res.fork,
                branches: Vec::new(),
            })
            .collect();

        Ok(repositories)
    }

    #[tracing::instrument(name = "GitHubApiAdapter::fetch_branches", skip(self))]
    async fn fetch_branches(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Branch>, GitHubApiError> {
        let url = format!("{}/repos/{owner}/{repo}/branches", self.base_url);

        let response = self.client.get(&url).send().await?;
        let response_items: Vec<GitHubBranchResponse> =
            Self::classify_response(response).await?;

        let branches = response_items
            .into_iter()
            .map(|branch_res| Branch {
                name: branch_res.name,
                commit: Commit {
                    sha: branch_res.commit.sha,
                },
            })
            .collect();

        Ok(branches)
    }
}
