//! Single-flight inference service
//!
//! `InferenceService` sits between the web handlers and the remote model. It
//! answers repeated inputs from a fingerprint-keyed cache, collapses
//! concurrent duplicate requests onto one in-flight job, and bounds both how
//! many remote calls run at once (worker pool) and how long a caller waits
//! (wait budget).
//!
//! A caller whose budget elapses gets [`Error::Timeout`], but the job itself
//! is never cancelled: the remote call cannot reliably be stopped mid-flight,
//! and letting it finish still yields a cache entry for later callers.

use crate::{CacheStore, InferenceClient, InferenceMetrics, MetricsSnapshot, WorkerPool};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use taglens_core::{normalize, ClassificationResult, Error, Fingerprint, Result};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Default caller wait budget
pub const DEFAULT_WAIT_BUDGET: Duration = Duration::from_secs(10);

/// Tuning knobs for the inference service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Number of worker slots for concurrent remote calls
    pub worker_slots: usize,

    /// How long a caller waits for a job before receiving `Timeout`
    pub wait_budget: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            worker_slots: crate::pool::DEFAULT_SLOTS,
            wait_budget: DEFAULT_WAIT_BUDGET,
        }
    }
}

/// One classification attempt's outcome, shared by all coalesced waiters
type Outcome = Result<ClassificationResult>;

/// Waiter-side handle to an in-flight job
#[derive(Clone)]
struct JobHandle {
    outcome: watch::Receiver<Option<Outcome>>,
}

/// The inference service. Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct InferenceService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    client: Arc<dyn InferenceClient>,
    cache: CacheStore,
    pool: WorkerPool,
    in_flight: Mutex<HashMap<Fingerprint, JobHandle>>,
    metrics: InferenceMetrics,
    wait_budget: Duration,
}

impl InferenceService {
    /// Create a service around the given client
    pub fn new(client: Arc<dyn InferenceClient>, config: ServiceConfig) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                client,
                cache: CacheStore::new(),
                pool: WorkerPool::new(config.worker_slots),
                in_flight: Mutex::new(HashMap::new()),
                metrics: InferenceMetrics::new(),
                wait_budget: config.wait_budget,
            }),
        }
    }

    /// Create a service with default pool size and wait budget
    pub fn with_defaults(client: Arc<dyn InferenceClient>) -> Self {
        Self::new(client, ServiceConfig::default())
    }

    /// Classify `text`, returning the top labels with percent confidences.
    ///
    /// Blank input fails with [`Error::InvalidInput`] before any cache or
    /// pool interaction. A cached result returns immediately. Otherwise the
    /// caller either joins the job already running for this text or starts
    /// one, then waits up to the configured budget for its outcome.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.inner.metrics.record_request();

        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(Error::InvalidInput);
        }
        let fp = Fingerprint::of(&normalized);

        if let Some(hit) = self.inner.cache.get(&fp) {
            self.inner.metrics.record_cache_hit();
            debug!(fingerprint = %fp, "cache hit");
            return Ok(hit);
        }

        // Registry check and job creation happen under one lock, so two
        // concurrent misses for the same fingerprint cannot both spawn a job.
        let mut rx = {
            let mut in_flight = self.inner.in_flight.lock();
            if let Some(job) = in_flight.get(&fp) {
                self.inner.metrics.record_coalesced_wait();
                job.outcome.clone()
            } else if let Some(hit) = self.inner.cache.get(&fp) {
                // The job completed between the fast-path lookup and taking
                // the registry lock.
                self.inner.metrics.record_cache_hit();
                return Ok(hit);
            } else {
                let (tx, rx) = watch::channel(None);
                in_flight.insert(fp, JobHandle {
                    outcome: rx.clone(),
                });
                self.spawn_job(fp, normalized, tx);
                rx
            }
        };

        match tokio::time::timeout(self.inner.wait_budget, await_outcome(&mut rx)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                self.inner.metrics.record_timeout();
                warn!(
                    fingerprint = %fp,
                    budget_ms = self.inner.wait_budget.as_millis() as u64,
                    "wait budget elapsed; job continues in the background"
                );
                Err(Error::Timeout)
            }
        }
    }

    /// Spawn a detached job for `fp`. The job survives every waiter: a
    /// success that lands after all callers timed out still populates the
    /// cache.
    fn spawn_job(&self, fp: Fingerprint, text: String, tx: watch::Sender<Option<Outcome>>) {
        debug!(fingerprint = %fp, client = self.inner.client.name(), "starting job");
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            let outcome = inner
                .pool
                .run(async {
                    inner.metrics.record_upstream_call();
                    let raw = inner.client.predict(&text).await?;
                    ClassificationResult::from_raw(raw)
                })
                .await;

            // The cache write and the registry removal happen under the
            // registry lock, so no caller can observe a successful job as
            // neither cached nor in flight.
            {
                let mut in_flight = inner.in_flight.lock();
                if let Ok(ref result) = outcome {
                    inner.cache.put(fp, result.clone());
                }
                in_flight.remove(&fp);
            }

            match &outcome {
                Ok(result) => debug!(
                    fingerprint = %fp,
                    labels = result.labels.len(),
                    "job succeeded"
                ),
                Err(e) => {
                    inner.metrics.record_upstream_failure();
                    warn!(fingerprint = %fp, error = %e, "job failed; nothing cached");
                }
            }

            // All waiters may have timed out and dropped their receivers;
            // the cache write above already happened, so the send result
            // does not matter.
            let _ = tx.send(Some(outcome));
        });
    }

    /// Snapshot of the service counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.inner.metrics.snapshot()
    }

    /// Number of results currently cached
    pub fn cached_results(&self) -> usize {
        self.inner.cache.len()
    }

    /// Number of jobs currently in flight
    pub fn jobs_in_flight(&self) -> usize {
        self.inner.in_flight.lock().len()
    }

    /// Number of worker slots
    pub fn worker_slots(&self) -> usize {
        self.inner.pool.slots()
    }
}

/// Wait until the job publishes its outcome. Every waiter receives a clone
/// of the same completed outcome.
async fn await_outcome(rx: &mut watch::Receiver<Option<Outcome>>) -> Outcome {
    loop {
        if let Some(outcome) = rx.borrow_and_update().as_ref().cloned() {
            return outcome;
        }
        if rx.changed().await.is_err() {
            return Err(Error::internal(
                "classification job ended without reporting an outcome",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use taglens_core::{RawPrediction, RawScore};

    struct StaticClient;

    #[async_trait]
    impl InferenceClient for StaticClient {
        async fn predict(&self, _text: &str) -> Result<RawPrediction> {
            Ok(RawPrediction {
                confidences: vec![RawScore {
                    label: "cs.LG".to_string(),
                    confidence: 0.9,
                }],
            })
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    #[tokio::test]
    async fn test_blank_input_rejected_before_any_work() {
        let service = InferenceService::with_defaults(Arc::new(StaticClient));

        assert!(matches!(
            service.classify("").await.unwrap_err(),
            Error::InvalidInput
        ));
        assert!(matches!(
            service.classify("   \t\n").await.unwrap_err(),
            Error::InvalidInput
        ));

        let snapshot = service.metrics();
        assert_eq!(snapshot.upstream_calls, 0);
        assert_eq!(service.cached_results(), 0);
    }

    #[tokio::test]
    async fn test_classify_returns_percentages() {
        let service = InferenceService::with_defaults(Arc::new(StaticClient));

        let result = service.classify("attention is all you need").await.unwrap();
        assert_eq!(result.labels[0].label, "cs.LG");
        assert_eq!(result.labels[0].confidence, 90.0);
    }

    #[tokio::test]
    async fn test_whitespace_variants_share_one_cache_entry() {
        let service = InferenceService::with_defaults(Arc::new(StaticClient));

        service.classify("deep  learning").await.unwrap();
        service.classify("  deep learning \n").await.unwrap();

        assert_eq!(service.cached_results(), 1);
        assert_eq!(service.metrics().upstream_calls, 1);
    }
}
