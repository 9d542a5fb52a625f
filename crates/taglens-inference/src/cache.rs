//! Result cache keyed by request fingerprint

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use taglens_core::{ClassificationResult, Fingerprint};

/// Thread-safe map from fingerprint to the last known-good classification
/// result. Only successful, well-formed results are ever stored; a failed
/// attempt leaves its fingerprint absent so a later request retries.
///
/// Lookups never block on pending work. There is no eviction: entries live
/// for the process lifetime.
#[derive(Clone, Default)]
pub struct CacheStore {
    inner: Arc<RwLock<HashMap<Fingerprint, ClassificationResult>>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result. Returns `None` while a job for this
    /// fingerprint is still in flight.
    pub fn get(&self, fp: &Fingerprint) -> Option<ClassificationResult> {
        self.inner.read().get(fp).cloned()
    }

    /// Store a successful result. Idempotent; last writer wins, which is
    /// harmless since every writer for a fingerprint derived its result from
    /// the same upstream call.
    pub fn put(&self, fp: Fingerprint, result: ClassificationResult) {
        self.inner.write().insert(fp, result);
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
