//! HTTP request and response types described as plain data.
//!
//! # Design
//! The fetcher builds an `HttpRequest` and parses an `HttpResponse` without
//! knowing how the bytes travel. A `Transport` implementation performs the
//! actual round-trip, so tests can swap the network for a deterministic stub.

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Non-2xx statuses are data, not errors; interpreting them is the
/// fetcher's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
