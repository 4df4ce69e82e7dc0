//! Bounded offload of blocking collaborator calls.

use std::fmt;
use std::sync::Arc;

use atom_core::{Error, Result};
use tokio::sync::Semaphore;

/// Tracing target for blocking pool operations.
const TRACING_TARGET: &str = "atom_server::service::pool";

/// Runs blocking closures on tokio's blocking threads, at most `capacity`
/// at a time.
///
/// With the default capacity of one, every blocking speech call is strictly
/// serialized behind the previous one.
#[derive(Clone)]
pub struct BlockingPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl BlockingPool {
    /// Creates a pool; a capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Maximum number of closures running at once.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Waits for a free slot, then runs `task` on a blocking thread.
    ///
    /// The slot is held until `task` returns, even if the caller stops
    /// waiting for the result.
    pub async fn run<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self.permits.clone().acquire_owned().await.map_err(|e| {
            Error::internal_error()
                .with_message("Blocking pool is closed")
                .with_source(e)
        })?;

        tracing::trace!(
            target: TRACING_TARGET,
            available = self.permits.available_permits(),
            "blocking task started"
        );

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            task()
        })
        .await
        .map_err(|e| {
            tracing::error!(target: TRACING_TARGET, error = %e, "blocking task failed");
            Error::internal_error()
                .with_message("Blocking task failed")
                .with_source(e)
        })?
    }
}

impl Default for BlockingPool {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Debug for BlockingPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingPool")
            .field("capacity", &self.capacity)
            .field("available", &self.permits.available_permits())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[test]
    fn zero_capacity_is_raised() {
        assert_eq!(BlockingPool::new(0).capacity(), 1);
    }

    #[tokio::test]
    async fn returns_task_result() -> Result<()> {
        let pool = BlockingPool::default();
        assert_eq!(pool.run(|| Ok(21 * 2)).await?, 42);

        let err = pool
            .run(|| Err::<(), _>(Error::internal_error().with_message("engine crashed")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "engine crashed");
        Ok(())
    }

    #[tokio::test]
    async fn panics_become_errors() {
        let pool = BlockingPool::default();
        let result: Result<()> = pool.run(|| panic!("decoder bug")).await;
        assert_eq!(result.unwrap_err().to_string(), "Blocking task failed");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn single_slot_serializes_tasks() -> Result<()> {
        let pool = BlockingPool::new(1);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks = (0..4).map(|_| {
            let pool = pool.clone();
            let running = running.clone();
            let peak = peak.clone();
            async move {
                pool.run(move || {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(20));
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                })
                .await
            }
        });

        for result in futures::future::join_all(tasks).await {
            result?;
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        Ok(())
    }
}
