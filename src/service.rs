//! Portfolio data access.
//!
//! Operations split into two kinds. Required data (`get_user`,
//! `get_user_repos`) returns [`Result`] and the caller must deal with the
//! failure. Enrichment data (`get_pinned_repos`, `get_user_readme`) cannot
//! fail: problems are logged and collapse to an empty value so the page still
//! renders.

use crate::catalog::{derive_pinned, normalize_listing};
use crate::error::{GitfolioError, Result};
use crate::github::ProfileSource;
use crate::models::{PinnedRepository, ProfileBundle, Repository, User};
use crate::readme::{decode_file, README_PATH};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct PortfolioService {
    source: Arc<dyn ProfileSource>,
}

impl PortfolioService {
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        PortfolioService { source }
    }

    pub async fn get_user(&self, username: &str) -> Result<User> {
        match self.source.fetch_user(username).await {
            Ok(user) => Ok(User::from(user)),
            Err(e) => {
                error!("Error fetching user {}: {}", username, e);
                Err(GitfolioError::NotFound(format!(
                    "User \"{}\" not found",
                    username
                )))
            }
        }
    }

    /// Owned repositories that are neither forks nor archived, most starred
    /// first. Only the first page of 100 is read.
    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        match self.source.fetch_owned_repos(username).await {
            Ok(repos) => Ok(normalize_listing(repos)),
            Err(e) => {
                error!("Error fetching repos for {}: {}", username, e);
                Err(GitfolioError::FetchFailed(format!(
                    "Failed to fetch repositories for \"{}\"",
                    username
                )))
            }
        }
    }

    pub async fn get_pinned_repos(&self, username: &str) -> Vec<PinnedRepository> {
        match self.get_user_repos(username).await {
            Ok(repos) => derive_pinned(&repos),
            Err(e) => {
                warn!("Pinned repositories unavailable for {}: {}", username, e);
                Vec::new()
            }
        }
    }

    /// README.md of the `{username}/{username}` profile repository, if any.
    pub async fn get_user_readme(&self, username: &str) -> Option<String> {
        let decoded = self
            .source
            .fetch_file(username, username, README_PATH)
            .await
            .and_then(|file| decode_file(&file));

        match decoded {
            Ok(readme) => Some(readme),
            Err(e) => {
                info!("No profile README found for {}: {}", username, e);
                None
            }
        }
    }

    /// Fetch profile, pinned repositories and README concurrently.
    ///
    /// Fails when the profile fetch fails, whatever the other two produced.
    pub async fn load_profile(&self, username: &str) -> Result<ProfileBundle> {
        let (user, pinned, readme) = futures::join!(
            self.get_user(username),
            self.get_pinned_repos(username),
            self.get_user_readme(username)
        );

        Ok(ProfileBundle {
            user: user?,
            pinned,
            readme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GitHubContent, GitHubRepo, GitHubUser};
    use async_trait::async_trait;

    /// Source where every endpoint fails.
    struct Unreachable;

    #[async_trait]
    impl ProfileSource for Unreachable {
        async fn fetch_user(&self, _username: &str) -> Result<GitHubUser> {
            Err(GitfolioError::ApiError("connection refused".to_string()))
        }

        async fn fetch_owned_repos(&self, _username: &str) -> Result<Vec<GitHubRepo>> {
            Err(GitfolioError::ApiError("connection refused".to_string()))
        }

        async fn fetch_file(&self, _owner: &str, _repo: &str, _path: &str) -> Result<GitHubContent> {
            Err(GitfolioError::NotFound("no such file".to_string()))
        }
    }

    fn service() -> PortfolioService {
        PortfolioService::new(Arc::new(Unreachable))
    }

    #[tokio::test]
    async fn user_failure_names_the_username() {
        let err = service().get_user("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "User \"ghost\" not found");
    }

    #[tokio::test]
    async fn repo_failure_is_fetch_failed() {
        let err = service().get_user_repos("ghost").await.unwrap_err();
        assert!(matches!(err, GitfolioError::FetchFailed(_)));
        assert_eq!(err.to_string(), "Failed to fetch repositories for \"ghost\"");
    }

    #[tokio::test]
    async fn enrichment_degrades_quietly() {
        assert!(service().get_pinned_repos("ghost").await.is_empty());
        assert_eq!(service().get_user_readme("ghost").await, None);
    }

    #[tokio::test]
    async fn load_profile_fails_with_the_profile() {
        let err = service().load_profile("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
