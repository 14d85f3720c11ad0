//! The network seam and its reqwest-backed implementation.
//!
//! `Transport` is the only place the fetcher suspends. Tests inject stubs that
//! answer from memory or fail deterministically; production code uses
//! `ReqwestTransport`.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP GET round-trip.
///
/// Implementations return non-2xx responses as data and reserve `Err` for
/// failures where no response was obtained at all.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport + Sync> Transport for &T {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

/// `Transport` over a shared reqwest `Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport_error)?;
        Ok(HttpResponse { status, body })
    }
}

fn map_transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError(format!("request timed out: {err}"));
    }
    if err.is_connect() {
        return TransportError(format!("connection failed: {err}"));
    }
    TransportError(err.to_string())
}
