use crate::error::{GitfolioError, Result};
use crate::types::{GitHubContent, GitHubRepo, GitHubUser};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
/// Listing is a single page; accounts with more repositories are truncated.
pub const REPOS_PER_PAGE: u32 = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("gitfolio/", env!("CARGO_PKG_VERSION"));

/// Read access to the provider endpoints the portfolio is built from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// `GET /users/{username}`
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser>;

    /// `GET /users/{username}/repos`, owner repositories only, one page.
    async fn fetch_owned_repos(&self, username: &str) -> Result<Vec<GitHubRepo>>;

    /// `GET /repos/{owner}/{repo}/contents/{path}`
    async fn fetch_file(&self, owner: &str, repo: &str, path: &str) -> Result<GitHubContent>;
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_options(API_BASE_URL, DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    pub fn with_options(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(GitfolioError::ConfigError(format!(
                "API base URL cannot carry a path: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(GitHubClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GitfolioError::ConfigError(format!(
                    "API base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn make_request(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        match response.status() {
            StatusCode::OK => {
                if matches!(rate_limit_remaining, Some(remaining) if remaining < 10) {
                    warn!(
                        "GitHub rate limit low ({} remaining)",
                        rate_limit_remaining.unwrap_or_default()
                    );
                }
                Ok(response)
            }
            StatusCode::NOT_FOUND => Err(GitfolioError::NotFound(format!(
                "Resource not found: {}",
                url
            ))),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if rate_limit_remaining == Some(0) =>
            {
                let reset = response
                    .headers()
                    .get("X-RateLimit-Reset")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<i64>().ok())
                    .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
                    .map(|reset| reset.to_rfc3339())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(GitfolioError::RateLimitExceeded(format!(
                    "API rate limit exceeded. Reset at: {}",
                    reset
                )))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(GitfolioError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        let url = self.endpoint(&["users", username])?;
        let response = self.make_request(url).await?;
        let user: GitHubUser = response.json().await?;
        Ok(user)
    }

    async fn fetch_owned_repos(&self, username: &str) -> Result<Vec<GitHubRepo>> {
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &REPOS_PER_PAGE.to_string())
            .append_pair("type", "owner");

        let response = self.make_request(url).await?;
        let repos: Vec<GitHubRepo> = response.json().await?;
        Ok(repos)
    }

    async fn fetch_file(&self, owner: &str, repo: &str, path: &str) -> Result<GitHubContent> {
        let mut segments = vec!["repos", owner, repo, "contents"];
        segments.extend(path.split('/').filter(|part| !part.is_empty()));
        let url = self.endpoint(&segments)?;

        // A directory path answers with an array, which fails to decode here.
        let body = self.make_request(url).await?.text().await?;
        let content: GitHubContent = serde_json::from_str(&body)?;
        Ok(content)
    }
}
