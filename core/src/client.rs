//! GitHub-flavoured client combining the user and repository fetchers.
//!
//! # Design
//! `GitHubClient` owns one `ResourceFetcher` per resource kind, both sharing
//! a clone of the same transport. Looking up a user together with their
//! repositories is offered twice, once awaiting the two requests one after
//! the other and once awaiting them together, with the same result shape.

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::error::{FetchResult, InvalidArgument};
use crate::fetcher::{Fetch, ResourceFetcher};
use crate::orchestrator::Orchestrator;
use crate::resource::{UserProfile, UserRepos};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Identifier, Repo, User};

/// A user profile and their repositories, each fetched independently.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAndRepos {
    pub user: FetchResult<User>,
    pub repos: FetchResult<Vec<Repo>>,
}

/// Why a `GitHubClient` could not be built.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct GitHubClient<Tr> {
    users: ResourceFetcher<UserProfile, Tr>,
    repos: ResourceFetcher<UserRepos, Tr>,
}

impl GitHubClient<ReqwestTransport> {
    /// Build a client from `config` backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is not an http(s) URL or the
    /// reqwest client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, BuildError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(&config.base_url, transport)?.with_user_agent(&config.user_agent))
    }
}

impl<Tr: Transport + Clone + Sync> GitHubClient<Tr> {
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `base_url` is not an http(s) URL.
    pub fn new(base_url: &str, transport: Tr) -> Result<Self, InvalidArgument> {
        Ok(Self {
            users: ResourceFetcher::new(base_url, transport.clone())?,
            repos: ResourceFetcher::new(base_url, transport)?,
        })
    }

    pub fn with_user_agent(self, user_agent: &str) -> Self {
        Self {
            users: self.users.with_user_agent(user_agent),
            repos: self.repos.with_user_agent(user_agent),
        }
    }

    pub fn users(&self) -> &ResourceFetcher<UserProfile, Tr> {
        &self.users
    }

    pub fn repos(&self) -> &ResourceFetcher<UserRepos, Tr> {
        &self.repos
    }

    /// Orchestrator over user profiles, borrowing this client's fetcher.
    pub fn user_orchestrator(&self) -> Orchestrator<&ResourceFetcher<UserProfile, Tr>> {
        Orchestrator::new(&self.users)
    }

    /// Fetch the profile, then the repositories once the profile has settled.
    pub async fn user_and_repos_sequential(
        &self,
        handle: &str,
    ) -> Result<UserAndRepos, InvalidArgument> {
        let id = Identifier::new(handle)?;
        debug!(%id, "user and repos, sequential");
        let user = self.users.fetch_id(&id).await;
        let repos = self.repos.fetch_id(&id).await;
        Ok(UserAndRepos { user, repos })
    }

    /// Issue both requests before awaiting either.
    pub async fn user_and_repos_concurrent(
        &self,
        handle: &str,
    ) -> Result<UserAndRepos, InvalidArgument> {
        let id = Identifier::new(handle)?;
        debug!(%id, "user and repos, concurrent");
        let (user, repos) = futures::join!(self.users.fetch_id(&id), self.repos.fetch_id(&id));
        Ok(UserAndRepos { user, repos })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::{sleep, Instant};

    use super::*;
    use crate::error::{FetchError, TransportError};
    use crate::http::{HttpRequest, HttpResponse};

    /// Routes by URL suffix after a fixed delay.
    #[derive(Clone)]
    struct Routes {
        delay: Duration,
        user_status: u16,
        log: Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl Routes {
        fn new(delay: Duration, user_status: u16) -> Self {
            Self {
                delay,
                user_status,
                log: Arc::default(),
            }
        }
    }

    impl Transport for Routes {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.log.lock().unwrap().push(request.url.clone());
            sleep(self.delay).await;
            if request.url.ends_with("/repos") {
                return Ok(HttpResponse::new(
                    200,
                    r#"[{"id":10,"name":"dotfiles","full_name":"alice/dotfiles","fork":false}]"#,
                ));
            }
            if self.user_status != 200 {
                return Ok(HttpResponse::new(self.user_status, r#"{"message":"Not Found"}"#));
            }
            Ok(HttpResponse::new(
                200,
                r#"{"login":"alice","id":1,"name":"Alice","public_repos":1}"#,
            ))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_and_concurrent_agree() {
        let d = Duration::from_millis(50);
        let client = GitHubClient::new("http://api.test", Routes::new(d, 200)).unwrap();

        let start = Instant::now();
        let sequential = client.user_and_repos_sequential("alice").await.unwrap();
        assert!(start.elapsed() >= d * 2);

        let start = Instant::now();
        let concurrent = client.user_and_repos_concurrent("alice").await.unwrap();
        assert!(start.elapsed() < d * 2);

        assert_eq!(sequential, concurrent);
        assert_eq!(sequential.user.unwrap().name.as_deref(), Some("Alice"));
        assert_eq!(sequential.repos.unwrap()[0].full_name, "alice/dotfiles");
    }

    #[tokio::test]
    async fn missing_user_does_not_hide_repos() {
        let client =
            GitHubClient::new("http://api.test", Routes::new(Duration::ZERO, 404)).unwrap();
        let both = client.user_and_repos_concurrent("alice").await.unwrap();
        assert_eq!(
            both.user,
            Err(FetchError::Remote {
                status: 404,
                message: "Not Found".to_string()
            })
        );
        assert_eq!(both.repos.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_handle_is_rejected_without_requests() {
        let transport = Routes::new(Duration::ZERO, 200);
        let client = GitHubClient::new("http://api.test", transport.clone()).unwrap();
        assert!(client.user_and_repos_sequential("").await.is_err());
        assert!(client.user_and_repos_concurrent("").await.is_err());
        assert!(transport.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn user_orchestrator_uses_the_profile_endpoint() {
        let transport = Routes::new(Duration::ZERO, 200);
        let client = GitHubClient::new("http://api.test/", transport.clone()).unwrap();
        let outcomes = client
            .user_orchestrator()
            .run_sequential(&["alice"])
            .await
            .unwrap();
        assert!(outcomes[0].is_success());
        assert_eq!(
            *transport.log.lock().unwrap(),
            vec!["http://api.test/users/alice".to_string()]
        );
    }
}
