//! Asynchronous fetch orchestration over a GitHub-style HTTP API.
//!
//! # Overview
//! A `ResourceFetcher` turns one identifier into one `FetchResult` by building
//! an `HttpRequest`, handing it to a `Transport`, and parsing the
//! `HttpResponse`. An `Orchestrator` runs a batch of fetches either
//! sequentially or concurrently and returns one `FetchOutcome` per input, in
//! input order, whichever strategy was used.
//!
//! # Design
//! - Fetchers are stateless apart from their base URL, identity headers and
//!   transport.
//! - Request building and response parsing are pure; only `Transport::send`
//!   suspends, so tests substitute stubs for the network.
//! - Failures are values. Only an empty identifier is a hard error, raised
//!   before any request is issued.
//! - Concurrency is cooperative within the calling task; nothing is spawned.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod orchestrator;
pub mod resource;
pub mod sequence;
pub mod transport;
pub mod types;

pub use client::{BuildError, GitHubClient, UserAndRepos};
pub use config::{Config, ConfigError};
pub use error::{FetchError, FetchResult, InvalidArgument, TransportError};
pub use fetcher::{Fetch, ResourceFetcher};
pub use http::{HttpRequest, HttpResponse};
pub use orchestrator::Orchestrator;
pub use resource::{Resource, UserProfile, UserRepos};
pub use transport::{ReqwestTransport, Transport};
pub use types::{FetchOutcome, Identifier, Repo, User};
