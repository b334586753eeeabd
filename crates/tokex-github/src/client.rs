//! GitHub Git Data API client.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::traits::GitDataApi;
use crate::types::{
    BlobCreated, CommitCreated, CommitInfo, CreateRef, GitRef, NewBlob, NewCommit, NewTree,
    TreeCreated, UpdateRef,
};

/// GitHub API client for the Git Data endpoints.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: SecretString,
    max_attempts: u32,
    retry_base_delay: Duration,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Default number of attempts per request (1 initial + 2 retries).
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Default base delay for exponential backoff.
    pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

    /// Create a new client against the public GitHub API.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(token: SecretString) -> Result<Self> {
        Self::with_base_url(token, Self::DEFAULT_API_URL)
    }

    /// Create a new client with a custom API URL (GitHub Enterprise,
    /// or a mock server in tests).
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn with_base_url(token: SecretString, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("tokex"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            retry_base_delay: Self::DEFAULT_RETRY_BASE_DELAY,
        })
    }

    /// Override the retry bounds.
    #[must_use]
    pub fn with_retry(mut self, max_attempts: u32, base_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_base_delay = base_delay;
        self
    }

    /// Issue one request, retrying retryable failures with exponential
    /// backoff up to the attempt bound.
    async fn execute<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 1;

        loop {
            let mut request = self.client.request(method.clone(), &url).header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            );
            if let Some(body) = body {
                request = request.json(body);
            }

            let outcome = match request.send().await {
                Ok(response) => Self::handle_response(response).await,
                Err(err) => Err(Error::Network(err)),
            };

            match outcome {
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.retry_base_delay * 2_u32.saturating_pow(attempt - 1);
                    log::warn!(
                        "retryable error on {method} {path} (attempt {attempt}/{}): {err}; backing off {delay:?}",
                        self.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Classify an API response in one place.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.json().await?;
            return Ok(body);
        }

        let status_code = status.as_u16();
        match status_code {
            401 => Err(Error::AuthenticationFailed),
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Err(Error::RateLimited)
            }
            403 => Err(Error::PermissionDenied),
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::NotFound(text))
            }
            422 => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::Unprocessable { message: text })
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::Api {
                    status: status_code,
                    message: text,
                })
            }
        }
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl GitDataApi for GitHubClient {
    async fn get_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<GitRef> {
        self.execute::<_, ()>(
            Method::GET,
            &format!("/repos/{owner}/{repo}/git/refs/heads/{branch}"),
            None,
        )
        .await
    }

    async fn create_ref(&self, owner: &str, repo: &str, create: CreateRef) -> Result<GitRef> {
        self.execute(
            Method::POST,
            &format!("/repos/{owner}/{repo}/git/refs"),
            Some(&create),
        )
        .await
    }

    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<CommitInfo> {
        self.execute::<_, ()>(
            Method::GET,
            &format!("/repos/{owner}/{repo}/git/commits/{sha}"),
            None,
        )
        .await
    }

    async fn create_blob(&self, owner: &str, repo: &str, blob: NewBlob) -> Result<BlobCreated> {
        self.execute(
            Method::POST,
            &format!("/repos/{owner}/{repo}/git/blobs"),
            Some(&blob),
        )
        .await
    }

    async fn create_tree(&self, owner: &str, repo: &str, tree: NewTree) -> Result<TreeCreated> {
        self.execute(
            Method::POST,
            &format!("/repos/{owner}/{repo}/git/trees"),
            Some(&tree),
        )
        .await
    }

    async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        commit: NewCommit,
    ) -> Result<CommitCreated> {
        self.execute(
            Method::POST,
            &format!("/repos/{owner}/{repo}/git/commits"),
            Some(&commit),
        )
        .await
    }

    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        update: UpdateRef,
    ) -> Result<GitRef> {
        self.execute(
            Method::PATCH,
            &format!("/repos/{owner}/{repo}/git/refs/heads/{branch}"),
            Some(&update),
        )
        .await
    }
}
