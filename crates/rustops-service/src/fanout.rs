//! Bounded, order-preserving fan-out over independent lookups.

use std::future::Future;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use rustops_core::error::{AppError, ErrorKind};
use rustops_core::result::AppResult;

/// Run `f` over `items` with at most `limit` futures in flight.
///
/// Results are returned in input order regardless of completion order.
pub async fn ordered_fanout<I, T, F, Fut>(items: I, limit: usize, f: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(items)
        .map(f)
        .buffered(limit.max(1))
        .collect()
        .await
}

/// Await an external call, failing with `kind` once `timeout` elapses.
pub async fn with_timeout<T, Fut>(
    kind: ErrorKind,
    timeout: Duration,
    operation: &str,
    fut: Fut,
) -> AppResult<T>
where
    Fut: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::new(
            kind,
            format!("{operation} timed out after {}s", timeout.as_secs()),
        )),
    }
}
