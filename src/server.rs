use crate::catalog::RepoQuery;
use crate::error::{GitfolioError, Result};
use crate::pages;
use crate::service::PortfolioService;
use crate::username::validate_username;
use crate::view::{PageState, ViewState};
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: PortfolioService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: PortfolioService) -> Self {
        AppState {
            service,
            start_time: Instant::now(),
        }
    }
}

/// Response for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadmeResponse {
    pub readme: Option<String>,
}

/// Landing form submission
#[derive(Debug, Deserialize)]
pub struct LandingParams {
    pub username: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/health", get(health_check))
        // JSON interface
        .route("/api/users/:username", get(api_user))
        .route("/api/users/:username/repos", get(api_repos))
        .route("/api/users/:username/pinned", get(api_pinned))
        .route("/api/users/:username/readme", get(api_readme))
        // Pages
        .route("/:username", get(profile))
        .route("/:username/projects", get(projects))
        .route("/:username/contact", get(contact))
        .fallback(not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Serve the portfolio until `shutdown` resolves.
pub async fn start_server<F>(state: AppState, addr: SocketAddr, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Portfolio server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

fn error_status(error: &GitfolioError) -> StatusCode {
    match error {
        GitfolioError::NotFound(_) => StatusCode::NOT_FOUND,
        GitfolioError::FetchFailed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: &GitfolioError) -> Response {
    (
        error_status(error),
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Pages only exist for names that could be GitHub accounts.
fn page_username(raw: &str) -> Option<String> {
    validate_username(raw).ok().map(str::to_string)
}

/// The JSON counterpart of [`page_username`]: rejected names never reach the provider.
fn api_username(raw: &str) -> std::result::Result<String, Response> {
    page_username(raw).ok_or_else(|| {
        error_response(&GitfolioError::NotFound(format!("User \"{}\" not found", raw)))
    })
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "alive".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    )
}

async fn landing(Query(params): Query<LandingParams>) -> Response {
    let Some(submitted) = params.username else {
        return Html(pages::landing_page("", None)).into_response();
    };

    match validate_username(&submitted) {
        Ok(username) => Redirect::to(&format!("/{}", username)).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Html(pages::landing_page(&submitted, Some(&e.to_string()))),
        )
            .into_response(),
    }
}

async fn profile(State(state): State<AppState>, Path(raw): Path<String>, uri: Uri) -> Response {
    let Some(username) = page_username(&raw) else {
        return not_found(uri).await.into_response();
    };

    let mut page = PageState::new();
    let ticket = page.begin(&username);
    let result = state.service.load_profile(ticket.username()).await;
    page.settle(&ticket, result);

    let status = match page.state() {
        ViewState::Failed(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    (status, Html(pages::profile_page(&username, page.state()))).into_response()
}

async fn projects(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Query(query): Query<RepoQuery>,
    uri: Uri,
) -> Response {
    let Some(username) = page_username(&raw) else {
        return not_found(uri).await.into_response();
    };

    let mut page = PageState::new();
    let ticket = page.begin(&username);
    let result = state.service.get_user_repos(ticket.username()).await;
    page.settle(&ticket, result);

    let status = match page.state() {
        ViewState::Failed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Html(pages::projects_page(&username, page.state(), &query))).into_response()
}

async fn contact(State(state): State<AppState>, Path(raw): Path<String>, uri: Uri) -> Response {
    let Some(username) = page_username(&raw) else {
        return not_found(uri).await.into_response();
    };

    let mut page = PageState::new();
    let ticket = page.begin(&username);
    let result = state.service.get_user(ticket.username()).await;
    page.settle(&ticket, result);

    let status = match page.state() {
        ViewState::Failed(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    (status, Html(pages::contact_page(&username, page.state()))).into_response()
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page(uri.path())))
}

async fn api_user(State(state): State<AppState>, Path(raw): Path<String>) -> Response {
    let username = match api_username(&raw) {
        Ok(username) => username,
        Err(response) => return response,
    };

    match state.service.get_user(&username).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn api_repos(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Query(query): Query<RepoQuery>,
) -> Response {
    let username = match api_username(&raw) {
        Ok(username) => username,
        Err(response) => return response,
    };

    match state.service.get_user_repos(&username).await {
        Ok(repos) => (StatusCode::OK, Json(query.apply(&repos))).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn api_pinned(State(state): State<AppState>, Path(raw): Path<String>) -> Response {
    match api_username(&raw) {
        Ok(username) => Json(state.service.get_pinned_repos(&username).await).into_response(),
        Err(response) => response,
    }
}

async fn api_readme(State(state): State<AppState>, Path(raw): Path<String>) -> Response {
    match api_username(&raw) {
        Ok(username) => Json(ReadmeResponse {
            readme: state.service.get_user_readme(&username).await,
        })
        .into_response(),
        Err(response) => response,
    }
}
