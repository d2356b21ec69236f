//! Batched execution helpers for sets of async operations
//!
//! All runners share the same grouping rule: operations are split into
//! consecutive groups of at most `batch_size`, a group runs concurrently,
//! and the next group does not start until every operation in the current
//! one has settled.

use crate::shared::errors::{AppError, AppResult};
use futures::future::join_all;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};

pub struct BatchRunner;

/// A single failed operation, tagged with its position in the input set.
#[derive(Debug)]
pub struct FailedOperation {
    pub index: usize,
    pub error: AppError,
}

/// Outcome of a `run_safe` call. Every operation lands in exactly one bucket.
#[derive(Debug)]
pub struct BatchOutcome<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<FailedOperation>,
}

impl BatchRunner {
    /// Run operations in sequential groups, fail-fast.
    ///
    /// If any operation in a group fails, the error of the lowest-index
    /// failure propagates and no further group starts.
    pub async fn run_batched<T, F>(operations: Vec<F>, batch_size: usize) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let batch_size = batch_size.max(1);
        let mut results = Vec::with_capacity(operations.len());
        let mut operations = operations.into_iter();

        loop {
            let group: Vec<_> = operations.by_ref().take(batch_size).collect();
            if group.is_empty() {
                break;
            }
            for settled in join_all(group).await {
                results.push(settled?);
            }
        }

        Ok(results)
    }

    /// Round-based retry over operation factories.
    ///
    /// All not-yet-succeeded operations are retried together each round; the
    /// wait before retry round k (1-indexed) is `backoff_multiplier^k`
    /// seconds. After the final round the error of the lowest failing index
    /// surfaces.
    pub async fn run_with_retry<T, F, Fut>(
        factories: Vec<F>,
        max_retries: u32,
        backoff_multiplier: f64,
    ) -> AppResult<Vec<T>>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let total = factories.len();
        let mut results: Vec<Option<T>> = Vec::with_capacity(total);
        results.resize_with(total, || None);
        let mut pending: Vec<usize> = (0..total).collect();
        let mut round: u32 = 0;

        loop {
            let attempts = join_all(pending.iter().map(|&index| {
                let factory = &factories[index];
                async move { (index, factory().await) }
            }))
            .await;

            let mut still_failing: Vec<(usize, AppError)> = Vec::new();
            for (index, attempt) in attempts {
                match attempt {
                    Ok(value) => results[index] = Some(value),
                    Err(error) => still_failing.push((index, error)),
                }
            }

            if still_failing.is_empty() {
                return results
                    .into_iter()
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| {
                        AppError::Internal("Retry bookkeeping lost an operation slot".to_string())
                    });
            }

            if round >= max_retries {
                // still_failing preserves index order, so the first entry is
                // the lowest failing slot
                let (index, error) = still_failing.swap_remove(0);
                log::warn!(
                    "Batch gave up after {} retries; {} operations unresolved, surfacing slot {}: {}",
                    max_retries,
                    1 + still_failing.len(),
                    index,
                    error
                );
                return Err(error);
            }

            round += 1;
            let wait_secs = backoff_multiplier.powi(round as i32).max(0.0);
            log::debug!(
                "Retry round {}: {} operations pending, waiting {:.1}s",
                round,
                still_failing.len(),
                wait_secs
            );
            sleep(Duration::from_secs_f64(wait_secs)).await;
            pending = still_failing.into_iter().map(|(index, _)| index).collect();
        }
    }

    /// Same grouping as `run_batched`, with each group raced against the
    /// configured timeout. Exceeding it fails the whole call.
    pub async fn run_with_timeout<T, F>(
        operations: Vec<F>,
        batch_size: usize,
        limit: Duration,
    ) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let batch_size = batch_size.max(1);
        let mut results = Vec::with_capacity(operations.len());
        let mut operations = operations.into_iter();

        loop {
            let group: Vec<_> = operations.by_ref().take(batch_size).collect();
            if group.is_empty() {
                break;
            }
            let settled = timeout(limit, join_all(group)).await.map_err(|_| {
                AppError::Timeout(format!("Batch exceeded its {}ms allotment", limit.as_millis()))
            })?;
            for result in settled {
                results.push(result?);
            }
        }

        Ok(results)
    }

    /// Same grouping as `run_batched`, but never fails: every operation's
    /// outcome is captured, tagged with its original index, and all groups
    /// run regardless of individual failures.
    pub async fn run_safe<T, F>(operations: Vec<F>, batch_size: usize) -> BatchOutcome<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let batch_size = batch_size.max(1);
        let mut outcome = BatchOutcome {
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        let mut operations = operations.into_iter().enumerate();

        loop {
            let group: Vec<_> = operations
                .by_ref()
                .take(batch_size)
                .map(|(index, operation)| async move { (index, operation.await) })
                .collect();
            if group.is_empty() {
                break;
            }
            for (index, settled) in join_all(group).await {
                match settled {
                    Ok(value) => outcome.succeeded.push(value),
                    Err(error) => outcome.failed.push(FailedOperation { index, error }),
                }
            }
        }

        outcome
    }

    /// Same semantics as `run_batched`, additionally invoking the callback
    /// once per completed group with (completed, total).
    pub async fn run_with_progress<T, F, P>(
        operations: Vec<F>,
        batch_size: usize,
        mut on_progress: P,
    ) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
        P: FnMut(usize, usize),
    {
        let batch_size = batch_size.max(1);
        let total = operations.len();
        let mut results = Vec::with_capacity(total);
        let mut operations = operations.into_iter();

        loop {
            let group: Vec<_> = operations.by_ref().take(batch_size).collect();
            if group.is_empty() {
                break;
            }
            for settled in join_all(group).await {
                results.push(settled?);
            }
            on_progress(results.len(), total);
        }

        Ok(results)
    }
}
