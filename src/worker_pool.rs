//! Bounded worker pool
//!
//! Caps the number of concurrently running tasks with a counting admission
//! gate. Tasks are interleaved on the caller's task, not spawned, and results
//! come back in submission order regardless of completion order.

use futures::future::join_all;
use std::future::Future;
use tokio::sync::Semaphore;
use tracing::warn;

/// Admission-gated task runner scoped to one phase
#[derive(Debug)]
pub struct BoundedWorkerPool {
    gate: Semaphore,
    limit: usize,
}

impl BoundedWorkerPool {
    /// Create a pool admitting at most `limit` tasks at once (minimum 1)
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            gate: Semaphore::new(limit),
            limit,
        }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Tasks currently holding a slot
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.limit - self.gate.available_permits()
    }

    /// Run every task, at most `limit` at a time.
    ///
    /// A task is only constructed once it holds a slot. The slot is a guard
    /// dropped when the task's future finishes, whatever its output, so
    /// failing tasks never starve the pool. No task is retried.
    pub async fn run<T, F, Fut, I>(&self, tasks: I) -> Vec<T>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let admitted = tasks.into_iter().map(|task| async move {
            let _slot = match self.gate.acquire().await {
                Ok(permit) => Some(permit),
                Err(e) => {
                    // Only reachable if the gate was closed, which this type never does
                    warn!("Admission gate unavailable, running task unbounded: {e}");
                    None
                }
            };
            task().await
        });

        join_all(admitted).await
    }
}
