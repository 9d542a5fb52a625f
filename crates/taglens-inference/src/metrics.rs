//! Metrics collection for the inference service

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter collection for inference-service monitoring
#[derive(Clone, Default)]
pub struct InferenceMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    requests: AtomicU64,
    cache_hits: AtomicU64,
    coalesced_waits: AtomicU64,
    upstream_calls: AtomicU64,
    upstream_failures: AtomicU64,
    timeouts: AtomicU64,
}

impl InferenceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classify request
    pub fn record_request(&self) {
        self.inner.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache hit
    pub fn record_cache_hit(&self) {
        self.inner.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a caller joining an already-running job
    pub fn record_coalesced_wait(&self) {
        self.inner.coalesced_waits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a call issued to the remote model
    pub fn record_upstream_call(&self) {
        self.inner.upstream_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed remote call
    pub fn record_upstream_failure(&self) {
        self.inner.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a caller whose wait budget elapsed
    pub fn record_timeout(&self) {
        self.inner.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.inner.requests.load(Ordering::Relaxed),
            cache_hits: self.inner.cache_hits.load(Ordering::Relaxed),
            coalesced_waits: self.inner.coalesced_waits.load(Ordering::Relaxed),
            upstream_calls: self.inner.upstream_calls.load(Ordering::Relaxed),
            upstream_failures: self.inner.upstream_failures.load(Ordering::Relaxed),
            timeouts: self.inner.timeouts.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub cache_hits: u64,
    pub coalesced_waits: u64,
    pub upstream_calls: u64,
    pub upstream_failures: u64,
    pub timeouts: u64,
}

impl MetricsSnapshot {
    /// Fraction of requests answered from the cache
    pub fn hit_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.requests as f64
        }
    }

    /// Fraction of requests that never needed their own upstream call
    /// (cache hits plus coalesced waits)
    pub fn dedup_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            (self.cache_hits + self.coalesced_waits) as f64 / self.requests as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let metrics = InferenceMetrics::new();

        metrics.record_request();
        metrics.record_request();
        metrics.record_cache_hit();
        metrics.record_upstream_call();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 2);
        assert_eq!(snapshot.cache_hits, 1);
        assert_eq!(snapshot.upstream_calls, 1);
        assert_eq!(snapshot.hit_rate(), 0.5);
    }

    #[test]
    fn test_rates_with_no_traffic() {
        let snapshot = InferenceMetrics::new().snapshot();
        assert_eq!(snapshot.hit_rate(), 0.0);
        assert_eq!(snapshot.dedup_rate(), 0.0);
    }
}
