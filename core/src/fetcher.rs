//! Single-resource fetcher: one identifier in, one `FetchResult` out.
//!
//! # Design
//! `ResourceFetcher` holds the base URL, the outbound identity headers and a
//! `Transport`; it keeps no state between calls. Each fetch is split the same
//! way as a host-does-IO client: `build_request` produces an `HttpRequest`,
//! the transport executes it, `parse_response` interprets the `HttpResponse`.
//! The two ends are pure and unit-tested without any network.
//!
//! Only a malformed identifier escapes as a hard `Err`. Transport, status and
//! decode failures are folded into the returned `FetchResult` and are never
//! retried here.

use std::future::Future;
use std::marker::PhantomData;

use reqwest::Url;
use tracing::debug;

use crate::error::{FetchError, FetchResult, InvalidArgument};
use crate::http::{HttpRequest, HttpResponse};
use crate::resource::Resource;
use crate::transport::Transport;
use crate::types::{ErrorBody, Identifier};

pub const DEFAULT_USER_AGENT: &str = "fetch-core/0.1";
const ACCEPT: &str = "application/vnd.github+json";

/// Anything that can turn a validated identifier into a `FetchResult`.
///
/// The orchestrator is written against this trait so it can drive any
/// fetcher, not only `ResourceFetcher`.
pub trait Fetch {
    type Output;

    fn fetch_id(
        &self,
        id: &Identifier,
    ) -> impl Future<Output = FetchResult<Self::Output>> + Send;
}

impl<F: Fetch + Sync> Fetch for &F {
    type Output = F::Output;

    fn fetch_id(
        &self,
        id: &Identifier,
    ) -> impl Future<Output = FetchResult<Self::Output>> + Send {
        (**self).fetch_id(id)
    }
}

/// Fetches one kind of `Resource` over a `Transport`.
#[derive(Debug, Clone)]
pub struct ResourceFetcher<R, Tr> {
    base_url: Url,
    user_agent: String,
    transport: Tr,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, Tr: Transport + Sync> ResourceFetcher<R, Tr> {
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `base_url` is not an absolute http(s)
    /// URL.
    pub fn new(base_url: &str, transport: Tr) -> Result<Self, InvalidArgument> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            transport,
            _resource: PhantomData,
        })
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the resource named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without touching the transport when
    /// `identifier` is empty. Every other failure is reported inside the
    /// inner `FetchResult`.
    pub async fn fetch(
        &self,
        identifier: &str,
    ) -> Result<FetchResult<R::Output>, InvalidArgument> {
        let id = Identifier::new(identifier)?;
        Ok(self.fetch_id(&id).await)
    }

    pub fn build_request(&self, id: &Identifier) -> HttpRequest {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, checked in `parse_base_url`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(R::path_segments(id));
        }
        HttpRequest {
            url: url.to_string(),
            headers: vec![
                ("accept".to_string(), ACCEPT.to_string()),
                ("user-agent".to_string(), self.user_agent.clone()),
            ],
        }
    }

    pub fn parse_response(&self, response: HttpResponse) -> FetchResult<R::Output> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl<R: Resource, Tr: Transport + Sync> Fetch for ResourceFetcher<R, Tr> {
    type Output = R::Output;

    async fn fetch_id(&self, id: &Identifier) -> FetchResult<R::Output> {
        let request = self.build_request(id);
        debug!(url = %request.url, "issuing request");
        let response = self.transport.send(request).await?;
        debug!(%id, status = response.status, "response received");
        self.parse_response(response)
    }
}

/// Parse a base URL, accepting only absolute http(s) URLs.
pub fn parse_base_url(raw: &str) -> Result<Url, InvalidArgument> {
    let url =
        Url::parse(raw).map_err(|e| InvalidArgument::new(format!("base URL {raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(InvalidArgument::new(format!(
            "base URL {raw:?}: scheme must be http or https"
        )));
    }
    Ok(url)
}

/// Map a non-2xx status to `FetchError::Remote`, preferring the server's own
/// `message` field.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|body| body.message)
        .unwrap_or_else(|_| format!("HTTP {}", response.status));
    Err(FetchError::Remote {
        status: response.status,
        message,
    })
}
