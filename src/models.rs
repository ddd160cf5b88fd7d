use crate::types::{GitHubRepo, GitHubUser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a GitHub account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub html_url: String,
    pub hireable: Option<bool>,
}

impl User {
    /// Name shown in headings: the display name, or the login when unset.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

impl From<GitHubUser> for User {
    fn from(user: GitHubUser) -> Self {
        User {
            login: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
            bio: user.bio,
            location: user.location,
            company: user.company,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            blog: user.blog,
            twitter_username: user.twitter_username,
            html_url: user.html_url,
            hireable: user.hireable,
        }
    }
}

/// Repository information, subset of the provider's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    pub topics: Vec<String>,
    pub homepage: Option<String>,
    pub archived: bool,
    pub fork: bool,
}

impl From<GitHubRepo> for Repository {
    fn from(repo: GitHubRepo) -> Self {
        Repository {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            html_url: repo.html_url,
            language: repo.language,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            updated_at: repo.updated_at,
            topics: repo.topics.unwrap_or_default(),
            homepage: repo.homepage,
            archived: repo.archived,
            fork: repo.fork,
        }
    }
}

/// A repository decorated for display in a project card grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinnedRepository {
    #[serde(flatten)]
    pub repo: Repository,
    #[serde(rename = "isPinned")]
    pub is_pinned: bool,
}

impl PinnedRepository {
    pub fn pinned(repo: Repository) -> Self {
        PinnedRepository { repo, is_pinned: true }
    }

    pub fn unpinned(repo: Repository) -> Self {
        PinnedRepository { repo, is_pinned: false }
    }
}

/// Everything the profile page needs, gathered in one round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileBundle {
    pub user: User,
    pub pinned: Vec<PinnedRepository>,
    pub readme: Option<String>,
}
