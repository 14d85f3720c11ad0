//! Sequential and concurrent composition of many fetches.
//!
//! # Design
//! Both strategies return one `FetchOutcome` per input identifier, in input
//! order, so their results can be compared directly. Failures are aggregated,
//! never short-circuited: a failed fetch becomes a failed outcome and its
//! siblings still run.
//!
//! Concurrency is cooperative and confined to the calling task. The
//! concurrent strategy creates every fetch future up front and polls them
//! together with `join_all`; nothing is spawned.
//!
//! Identifiers are validated as a batch before the first request, so a
//! malformed entry aborts the whole call without any network traffic.

use futures::future::join_all;
use futures::stream::{self, Stream, StreamExt};
use tracing::debug;

use crate::error::InvalidArgument;
use crate::fetcher::Fetch;
use crate::types::{FetchOutcome, Identifier};

/// Drives a `Fetch` implementation over a batch of identifiers.
#[derive(Debug, Clone)]
pub struct Orchestrator<F> {
    fetcher: F,
}

impl<F: Fetch> Orchestrator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch each identifier in turn, starting the next only after the
    /// previous one settled. Wall-clock time is the sum of the latencies.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any identifier is empty; no request is
    /// issued in that case.
    pub async fn run_sequential<S: AsRef<str>>(
        &self,
        identifiers: &[S],
    ) -> Result<Vec<FetchOutcome<F::Output>>, InvalidArgument> {
        let ids = Identifier::parse_all(identifiers)?;
        debug!(count = ids.len(), "sequential run started");

        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            let result = self.fetcher.fetch_id(&id).await;
            outcomes.push(FetchOutcome { id, result });
        }

        debug!(
            count = outcomes.len(),
            failed = count_failures(&outcomes),
            "sequential run finished"
        );
        Ok(outcomes)
    }

    /// Start every fetch at once and wait for all of them to settle.
    /// Wall-clock time is bounded by the slowest fetch. Outcomes are ordered
    /// by input position, not by completion.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any identifier is empty; no request is
    /// issued in that case.
    pub async fn run_concurrent<S: AsRef<str>>(
        &self,
        identifiers: &[S],
    ) -> Result<Vec<FetchOutcome<F::Output>>, InvalidArgument> {
        let ids = Identifier::parse_all(identifiers)?;
        debug!(count = ids.len(), "concurrent run started");

        let results = join_all(ids.iter().map(|id| self.fetcher.fetch_id(id))).await;
        let outcomes: Vec<_> = ids
            .into_iter()
            .zip(results)
            .map(|(id, result)| FetchOutcome { id, result })
            .collect();

        debug!(
            count = outcomes.len(),
            failed = count_failures(&outcomes),
            "concurrent run finished"
        );
        Ok(outcomes)
    }

    /// Lazy sequential variant: each fetch is issued only when the stream is
    /// polled for its next item.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any identifier is empty.
    pub fn stream_sequential<S: AsRef<str>>(
        &self,
        identifiers: &[S],
    ) -> Result<impl Stream<Item = FetchOutcome<F::Output>> + '_, InvalidArgument> {
        let ids = Identifier::parse_all(identifiers)?;
        Ok(stream::iter(ids).then(move |id| async move {
            let result = self.fetcher.fetch_id(&id).await;
            FetchOutcome { id, result }
        }))
    }
}

fn count_failures<T>(outcomes: &[FetchOutcome<T>]) -> usize {
    outcomes.iter().filter(|o| !o.is_success()).count()
}
