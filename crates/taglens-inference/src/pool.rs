//! Bounded worker pool for upstream calls

use std::future::Future;
use std::sync::Arc;
use taglens_core::{Error, Result};
use tokio::sync::Semaphore;

/// Default number of concurrent upstream calls
pub const DEFAULT_SLOTS: usize = 3;

/// Fixed set of execution slots bounding how many remote calls run at once.
///
/// Submissions past the slot count queue in FIFO order (the semaphore hands
/// permits to waiters in arrival order) with no depth limit: single-flight
/// dedup upstream of the pool already collapses duplicate demand.
#[derive(Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    slots: usize,
}

impl WorkerPool {
    /// Create a pool with the given number of slots
    pub fn new(slots: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(slots)),
            slots,
        }
    }

    /// Number of execution slots
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Slots not currently lent to a running job
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `work` on a slot, waiting for one to free up first.
    pub async fn run<T>(&self, work: impl Future<Output = Result<T>>) -> Result<T> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| Error::internal("worker pool was shut down"))?;
        work.await
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}
