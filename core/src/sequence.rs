//! Lazy, delayed sequences.
//!
//! `delayed` turns a finite list into a `Stream` that waits before producing
//! each element. The stream is not restartable; once drained it stays empty.

use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use tokio::time::sleep;

/// Yield each item of `items` after sleeping for `delay`.
///
/// Nothing happens until the stream is polled, and each element costs one
/// suspension of `delay`.
pub fn delayed<T, I>(items: I, delay: Duration) -> impl Stream<Item = T>
where
    I: IntoIterator<Item = T>,
{
    stream::unfold(items.into_iter(), move |mut iter| async move {
        let item = iter.next()?;
        sleep(delay).await;
        Some((item, iter))
    })
    .fuse()
}
