//! Answer cache: (domain, record type) → RRset under a bounded TTL.
//!
//! Sharded concurrent map, per-key atomicity, no global lock. Expiry is
//! lazy: expired entries read as absent and are dropped opportunistically
//! by the reader that finds them. No background eviction task.

pub mod entry;
pub mod key;

pub use entry::{CacheEntry, TtlPolicy};
pub use key::CacheKey;

use dashmap::DashMap;
use rootwalk_domain::config::CacheConfig;
use rootwalk_domain::{DnsQuery, RRSet};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
}

/// Point-in-time metrics snapshot, for the CLI stats line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub expirations: u64,
}

pub struct AnswerCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    max_entries: usize,
    ttl_policy: TtlPolicy,
    metrics: CacheMetrics,
}

impl AnswerCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            max_entries: config.max_entries.max(1),
            ttl_policy: TtlPolicy::from_config(config),
            metrics: CacheMetrics::default(),
        }
    }

    /// Cached RRset for this exact question, unless expired. A read that
    /// observes an expired entry removes it on the way out; the removal
    /// re-checks expiry under the shard lock, so an overwrite that lands
    /// between the read and the removal is never discarded.
    pub fn get(&self, query: &DnsQuery) -> Option<Arc<RRSet>> {
        let key = CacheKey::from(query);

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired() {
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                return Some(Arc::clone(&entry.rrset));
            }
            drop(entry);
            if self
                .entries
                .remove_if(&key, |_, entry| entry.is_expired())
                .is_some()
            {
                self.metrics.expirations.fetch_add(1, Ordering::Relaxed);
            }
        }

        self.metrics.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Insert or overwrite the entry for this question, stamping now.
    pub fn insert(&self, query: &DnsQuery, rrset: Arc<RRSet>) {
        let ttl = self.ttl_policy.ttl_for(&rrset);
        self.insert_with_ttl(query, rrset, ttl);
    }

    pub fn insert_with_ttl(&self, query: &DnsQuery, rrset: Arc<RRSet>, ttl_secs: u32) {
        let key = CacheKey::from(query);

        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.evict_random_entry();
        }

        self.entries.insert(key, CacheEntry::new(rrset, ttl_secs));
        self.metrics.insertions.fetch_add(1, Ordering::Relaxed);

        debug!(
            query = %query,
            ttl = ttl_secs,
            cache_size = self.entries.len(),
            "Inserted into answer cache"
        );
    }

    fn evict_random_entry(&self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }

        let random_idx = fastrand::usize(..len);
        if let Some(entry) = self.entries.iter().nth(random_idx) {
            let key = entry.key().clone();
            drop(entry);
            if self.entries.remove(&key).is_some() {
                self.metrics.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.metrics.hits.load(Ordering::Relaxed),
            misses: self.metrics.misses.load(Ordering::Relaxed),
            insertions: self.metrics.insertions.load(Ordering::Relaxed),
            evictions: self.metrics.evictions.load(Ordering::Relaxed),
            expirations: self.metrics.expirations.load(Ordering::Relaxed),
        }
    }
}
