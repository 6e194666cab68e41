//! Bounded-concurrency batch runner shared by the DNSBL prober and the
//! text-list synchronizer.

use futures_util::future::join_all;
use std::future::Future;
use tracing::{debug, warn};

/// Partition `items` into at most `parallelism` roughly-equal contiguous
/// batches and run `worker` over each batch on its own task.
///
/// Empty input short-circuits to an empty result. Results are collected
/// after every task has completed, in no guaranteed order relative to
/// submission; callers that need determinism must sort after collection.
///
/// Failure policy: a batch task that dies is logged at warn and contributes
/// nothing to the result; sibling batches are unaffected and nothing
/// propagates to the caller. Workers are expected to contain their own
/// per-item failures.
pub async fn run_chunked<T, R, F, Fut>(items: Vec<T>, parallelism: usize, worker: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    if items.is_empty() {
        return Vec::new();
    }

    let batch_count = parallelism.clamp(1, items.len());
    let batch_size = items.len().div_ceil(batch_count);
    debug!(
        items = items.len(),
        batches = batch_count,
        "partitioning work into concurrent batches"
    );

    let mut handles = Vec::with_capacity(batch_count);
    let mut remaining = items.into_iter();
    loop {
        let batch: Vec<T> = remaining.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }
        handles.push(tokio::spawn(worker(batch)));
    }

    join_all(handles)
        .await
        .into_iter()
        .filter_map(|joined| match joined {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(error = %e, "batch task failed; dropping its results");
                None
            }
        })
        .collect()
}
