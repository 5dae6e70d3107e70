//! Fan-out map execution over an ordered input collection
//!
//! Modeled on the usual fan-out shape: spawn one task per input, bound the
//! number in flight with a semaphore, tag every result with its input index,
//! and reassemble outputs in input order regardless of completion order.
//! Each invocation retries independently under the operation's
//! [`ExecutionPolicy`]; the first invocation to exhaust its retries cancels
//! the rest and fails the whole map (all-or-nothing).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::error::{BoxError, DeadlineExceeded, ExecutionError, ExecutionResult};
use crate::policy::ExecutionPolicy;

/// One element of the input collection, identified by its position
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem<T> {
    pub index: usize,
    pub value: T,
}

/// Metadata handed to the unit of work for one attempt
///
/// Carries the policy's memory hints verbatim; the executor does not
/// interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationContext {
    pub index: usize,
    pub attempt: u32,
    pub memory_request: Option<String>,
    pub memory_limit: Option<String>,
}

/// Runs a single-input/single-output unit of work over an ordered collection
pub struct MapExecutor {
    max_parallelism: usize,
}

impl MapExecutor {
    /// Create an executor with the given concurrency bound
    pub fn new(max_parallelism: usize) -> Self {
        Self {
            max_parallelism: max_parallelism.max(1),
        }
    }

    /// Create an executor from the execution configuration domain
    pub fn from_config(config: &sprocket_config::ExecutionConfig) -> Self {
        Self::new(config.max_parallelism)
    }

    /// Concurrency bound on simultaneously in-flight invocations
    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }

    /// Run `op` over every item, yielding outputs in input order
    ///
    /// `output[i]` always derives from `items[i]`. Fails with
    /// [`ExecutionError::Invocation`] as soon as any index exhausts its
    /// retries; results already produced for other indices are discarded.
    pub async fn execute<I, O, E, F, Fut>(
        &self,
        items: Vec<I>,
        policy: ExecutionPolicy,
        op: F,
    ) -> ExecutionResult<Vec<O>>
    where
        I: Clone + Send + 'static,
        O: Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(WorkItem<I>, InvocationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send,
    {
        self.execute_with_cancellation(items, policy, CancellationToken::new(), op)
            .await
    }

    /// Like [`execute`](Self::execute), but tied to an external cancellation
    /// token
    ///
    /// On cancellation, in-flight invocations are signaled to stop, queued
    /// invocations never start, and completed results are discarded. The
    /// caller's token is only ever read: an invocation failure cancels a
    /// child token scoped to this map operation, not the token passed in.
    pub async fn execute_with_cancellation<I, O, E, F, Fut>(
        &self,
        items: Vec<I>,
        policy: ExecutionPolicy,
        cancel: CancellationToken,
        op: F,
    ) -> ExecutionResult<Vec<O>>
    where
        I: Clone + Send + 'static,
        O: Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(WorkItem<I>, InvocationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send,
    {
        let total = items.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        debug!(total, max_parallelism = self.max_parallelism, "starting map fan-out");

        // Scope all-or-nothing cancellation to this operation; external
        // cancellation still propagates down through the child.
        let cancel = cancel.child_token();

        let op = Arc::new(op);
        let policy = Arc::new(policy);
        let semaphore = Arc::new(Semaphore::new(self.max_parallelism));
        let mut handles = Vec::with_capacity(total);

        for (index, item) in items.into_iter().enumerate() {
            let op = Arc::clone(&op);
            let policy = Arc::clone(&policy);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();

            handles.push(tokio::spawn(async move {
                // Queued-but-not-started invocations must not start once the
                // operation is cancelled.
                let permit = tokio::select! {
                    _ = cancel.cancelled() => return (index, Err(ExecutionError::Cancelled)),
                    permit = semaphore.acquire_owned() => permit,
                };
                let _permit = match permit {
                    Ok(permit) => permit,
                    Err(_) => return (index, Err(ExecutionError::Cancelled)),
                };
                if cancel.is_cancelled() {
                    return (index, Err(ExecutionError::Cancelled));
                }

                let result = run_invocation(index, item, &policy, &cancel, op.as_ref()).await;
                (index, result)
            }));
        }

        let mut outputs: Vec<Option<O>> = Vec::with_capacity(total);
        outputs.resize_with(total, || None);
        let mut failures: Vec<(usize, ExecutionError)> = Vec::new();

        for join_result in join_all(handles).await {
            match join_result {
                Ok((index, Ok(output))) => outputs[index] = Some(output),
                Ok((index, Err(err))) => failures.push((index, err)),
                Err(join_err) => failures.push((total, ExecutionError::TaskJoin(join_err.to_string()))),
            }
        }

        if !failures.is_empty() {
            return Err(select_failure(failures));
        }

        outputs
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ExecutionError::TaskJoin("invocation produced no result".to_string()))
    }
}

/// Pick the failure to surface for an all-or-nothing map
///
/// An exhausted invocation outranks the cancellations it triggered in its
/// siblings; among exhausted invocations the lowest index wins.
fn select_failure(mut failures: Vec<(usize, ExecutionError)>) -> ExecutionError {
    failures.sort_by_key(|(index, _)| *index);

    if let Some(position) = failures
        .iter()
        .position(|(_, err)| matches!(err, ExecutionError::Invocation { .. }))
    {
        return failures.swap_remove(position).1;
    }
    if let Some(position) = failures
        .iter()
        .position(|(_, err)| !matches!(err, ExecutionError::Cancelled))
    {
        return failures.swap_remove(position).1;
    }
    ExecutionError::Cancelled
}

async fn run_invocation<I, O, E, F, Fut>(
    index: usize,
    item: I,
    policy: &ExecutionPolicy,
    cancel: &CancellationToken,
    op: &F,
) -> ExecutionResult<O>
where
    I: Clone,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(WorkItem<I>, InvocationContext) -> Fut,
    Fut: Future<Output = Result<O, E>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1u32;

    loop {
        if cancel.is_cancelled() {
            return Err(ExecutionError::Cancelled);
        }

        let context = InvocationContext {
            index,
            attempt,
            memory_request: policy.memory_request.clone(),
            memory_limit: policy.memory_limit.clone(),
        };
        let work = op(
            WorkItem {
                index,
                value: item.clone(),
            },
            context,
        );

        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(ExecutionError::Cancelled),
            outcome = attempt_with_deadline(work, policy.timeout) => outcome,
        };

        match outcome {
            Ok(output) => return Ok(output),
            Err(cause) if attempt < max_attempts => {
                let delay = policy.backoff.delay_for_attempt(attempt);
                warn!(index, attempt, error = %cause, "invocation failed, retrying");
                tokio::select! {
                    _ = cancel.cancelled() => return Err(ExecutionError::Cancelled),
                    _ = sleep(delay) => {}
                }
                attempt += 1;
            }
            Err(cause) => {
                error!(index, attempt, error = %cause, "invocation exhausted retries");
                // All-or-nothing: stop siblings that have not started yet.
                cancel.cancel();
                return Err(ExecutionError::Invocation {
                    index,
                    attempts: attempt,
                    source: cause,
                });
            }
        }
    }
}

async fn attempt_with_deadline<O, E, Fut>(work: Fut, limit: Option<Duration>) -> Result<O, BoxError>
where
    E: std::error::Error + Send + Sync + 'static,
    Fut: Future<Output = Result<O, E>>,
{
    match limit {
        Some(limit) => match timeout(limit, work).await {
            Ok(result) => result.map_err(|e| Box::new(e) as BoxError),
            Err(_) => Err(Box::new(DeadlineExceeded { limit })),
        },
        None => work.await.map_err(|e| Box::new(e) as BoxError),
    }
}
