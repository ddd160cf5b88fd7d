use chrono::{DateTime, Utc};
use serde::Deserialize;

// GitHub API response structures

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub html_url: String,
    pub hireable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    pub topics: Option<Vec<String>>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
}

/// Body of `GET /repos/{owner}/{repo}/contents/{path}` for a single file.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubContent {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub encoding: Option<String>,
    pub content: Option<String>,
}
