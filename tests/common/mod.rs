#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gitfolio::github::{GitHubClient, DEFAULT_USER_AGENT};
use gitfolio::service::PortfolioService;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Canned provider data served by [`FakeGitHub`].
#[derive(Default, Clone)]
pub struct Fixtures {
    pub users: HashMap<String, Value>,
    pub repos: HashMap<String, Vec<Value>>,
    /// Keyed by `owner/repo/path`.
    pub files: HashMap<String, Value>,
    /// Usernames whose repository listing answers 500.
    pub broken_listings: HashSet<String>,
    /// Usernames whose requests answer 403 with an exhausted quota.
    pub rate_limited: HashSet<String>,
    /// Usernames whose requests answer a bare 403.
    pub forbidden: HashSet<String>,
}

impl Fixtures {
    pub fn with_user(mut self, login: &str) -> Self {
        self.users.insert(login.to_string(), user_json(login));
        self
    }

    pub fn with_repos(mut self, login: &str, repos: Vec<Value>) -> Self {
        self.repos.insert(login.to_string(), repos);
        self
    }

    pub fn with_readme(mut self, login: &str, text: &str) -> Self {
        self.files.insert(
            format!("{}/{}/README.md", login, login),
            json!({
                "type": "file",
                "encoding": "base64",
                "content": wrap_base64(&STANDARD.encode(text.as_bytes())),
            }),
        );
        self
    }

    pub fn with_broken_listing(mut self, login: &str) -> Self {
        self.broken_listings.insert(login.to_string());
        self
    }

    pub fn with_rate_limited(mut self, login: &str) -> Self {
        self.rate_limited.insert(login.to_string());
        self
    }

    pub fn with_forbidden(mut self, login: &str) -> Self {
        self.forbidden.insert(login.to_string());
        self
    }
}

/// The provider wraps base64 bodies at 60 columns.
fn wrap_base64(encoded: &str) -> String {
    encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_json(login: &str) -> Value {
    json!({
        "login": login,
        "id": 583231,
        "name": "The Octocat",
        "avatar_url": format!("https://avatars.githubusercontent.com/{}", login),
        "bio": null,
        "location": "San Francisco",
        "company": "@github",
        "public_repos": 8,
        "followers": 1000,
        "following": 9,
        "blog": "https://github.blog",
        "twitter_username": null,
        "html_url": format!("https://github.com/{}", login),
        "hireable": null,
        "type": "User"
    })
}

pub fn repo_json(id: u64, name: &str, stars: u32) -> Value {
    json!({
        "id": id,
        "node_id": format!("R_{}", id),
        "name": name,
        "full_name": format!("octocat/{}", name),
        "private": false,
        "description": format!("The {} project", name),
        "html_url": format!("https://github.com/octocat/{}", name),
        "language": "Rust",
        "stargazers_count": stars,
        "watchers_count": stars,
        "forks_count": 1,
        "updated_at": format!("2024-01-{:02}T10:00:00Z", id % 28 + 1),
        "topics": ["cli", "tools"],
        "homepage": null,
        "archived": false,
        "fork": false
    })
}

pub fn flagged_repo_json(id: u64, name: &str, stars: u32, fork: bool, archived: bool) -> Value {
    let mut repo = repo_json(id, name, stars);
    repo["fork"] = json!(fork);
    repo["archived"] = json!(archived);
    repo
}

#[derive(Clone)]
struct FakeState {
    fixtures: Arc<Fixtures>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeState {
    fn record(&self, uri: &Uri) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(uri.to_string());
        }
    }
}

fn missing() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not Found", "documentation_url": "https://docs.github.com/rest" })),
    )
        .into_response()
}

fn refused(fixtures: &Fixtures, login: &str) -> Option<Response> {
    let body = Json(json!({ "message": "API rate limit exceeded" }));
    if fixtures.rate_limited.contains(login) {
        return Some(
            (
                StatusCode::FORBIDDEN,
                [("X-RateLimit-Remaining", "0"), ("X-RateLimit-Reset", "1700000000")],
                body,
            )
                .into_response(),
        );
    }
    if fixtures.forbidden.contains(login) {
        return Some((StatusCode::FORBIDDEN, [("X-RateLimit-Remaining", "42")], body).into_response());
    }
    None
}

async fn get_user(State(state): State<FakeState>, Path(login): Path<String>, uri: Uri) -> Response {
    state.record(&uri);
    if let Some(response) = refused(&state.fixtures, &login) {
        return response;
    }
    match state.fixtures.users.get(&login) {
        Some(user) => Json(user.clone()).into_response(),
        None => missing(),
    }
}

async fn list_repos(State(state): State<FakeState>, Path(login): Path<String>, uri: Uri) -> Response {
    state.record(&uri);
    if let Some(response) = refused(&state.fixtures, &login) {
        return response;
    }
    if state.fixtures.broken_listings.contains(&login) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    match state.fixtures.repos.get(&login) {
        // the real API never returns more than per_page items
        Some(repos) => Json(repos.iter().take(100).cloned().collect::<Vec<_>>()).into_response(),
        None if state.fixtures.users.contains_key(&login) => Json(Vec::<Value>::new()).into_response(),
        None => missing(),
    }
}

async fn get_content(
    State(state): State<FakeState>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    uri: Uri,
) -> Response {
    state.record(&uri);
    match state.fixtures.files.get(&format!("{}/{}/{}", owner, repo, path)) {
        Some(file) => Json(file.clone()).into_response(),
        None => missing(),
    }
}

/// A GitHub REST look-alike listening on an ephemeral local port.
pub struct FakeGitHub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl FakeGitHub {
    pub async fn start(fixtures: Fixtures) -> anyhow::Result<Self> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            fixtures: Arc::new(fixtures),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/users/:login", get(get_user))
            .route("/users/:login/repos", get(list_repos))
            .route("/repos/:owner/:repo/contents/*path", get(get_content))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(FakeGitHub {
            base_url,
            requests,
            handle,
        })
    }

    pub fn client(&self) -> anyhow::Result<GitHubClient> {
        Ok(GitHubClient::with_options(
            &self.base_url,
            DEFAULT_USER_AGENT,
            Duration::from_secs(5),
        )?)
    }

    pub fn service(&self) -> anyhow::Result<PortfolioService> {
        Ok(PortfolioService::new(Arc::new(self.client()?)))
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Drop for FakeGitHub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
