//! In-memory stand-in for the subset of the GitHub REST API the fetch core
//! reads: `GET /users/{login}` and `GET /users/{login}/repos`.
//!
//! An optional artificial delay is applied to every response so sequential
//! and concurrent fetching can be told apart over real HTTP.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock, time::sleep};
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    pub name: Option<String>,
    pub public_repos: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub fork: bool,
}

/// Body GitHub returns with 4xx responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
    pub documentation_url: String,
}

#[derive(Clone, Debug)]
pub struct Account {
    pub user: User,
    pub repos: Vec<Repo>,
}

impl Account {
    pub fn new(login: &str, id: u64, name: Option<&str>, repo_names: &[&str]) -> Self {
        let repos: Vec<Repo> = repo_names
            .iter()
            .zip(1..)
            .map(|(repo, n)| Repo {
                id: id * 1000 + n,
                name: repo.to_string(),
                full_name: format!("{login}/{repo}"),
                fork: false,
            })
            .collect();
        Self {
            user: User {
                login: login.to_string(),
                id,
                name: name.map(str::to_string),
                public_repos: repos.len() as u32,
            },
            repos,
        }
    }
}

pub type Db = Arc<RwLock<HashMap<String, Account>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    delay: Duration,
}

/// Accounts served by `app()`.
pub fn fixtures() -> HashMap<String, Account> {
    [
        Account::new("octocat", 583231, Some("The Octocat"), &["hello-world", "spoon-knife"]),
        Account::new("alice", 1, Some("Alice"), &["dotfiles"]),
        Account::new("bob", 2, None, &[]),
    ]
    .into_iter()
    .map(|account| (account.user.login.clone(), account))
    .collect()
}

pub fn app() -> Router {
    app_with(fixtures(), Duration::ZERO)
}

pub fn app_with(accounts: HashMap<String, Account>, delay: Duration) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(accounts)),
        delay,
    };
    Router::new()
        .route("/users/{login}", get(get_user))
        .route("/users/{login}/repos", get(list_repos))
        .with_state(state)
}

/// Parse the artificial per-response delay, in whole milliseconds.
pub fn parse_delay_ms(raw: &str) -> Result<Duration, std::num::ParseIntError> {
    raw.trim().parse().map(Duration::from_millis)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, delay: Duration) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(fixtures(), delay)).await
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorMessage>)>;

fn not_found() -> (StatusCode, Json<ErrorMessage>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorMessage {
            message: "Not Found".to_string(),
            documentation_url: "https://docs.github.com/rest".to_string(),
        }),
    )
}

async fn get_user(State(state): State<AppState>, Path(login): Path<String>) -> ApiResult<User> {
    debug!(%login, "get user");
    sleep(state.delay).await;
    let accounts = state.db.read().await;
    accounts
        .get(&login)
        .map(|account| Json(account.user.clone()))
        .ok_or_else(not_found)
}

async fn list_repos(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> ApiResult<Vec<Repo>> {
    debug!(%login, "list repos");
    sleep(state.delay).await;
    let accounts = state.db.read().await;
    accounts
        .get(&login)
        .map(|account| Json(account.repos.clone()))
        .ok_or_else(not_found)
}
