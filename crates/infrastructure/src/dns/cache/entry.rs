use rootwalk_domain::config::CacheConfig;
use rootwalk_domain::RRSet;
use std::sync::Arc;
use std::time::Instant;

/// How an entry's lifetime is chosen on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlPolicy {
    /// One cache-wide TTL for every entry (compatibility default)
    Fixed(u32),
    /// The RRset's own minimum record TTL, clamped to `max` and floored
    /// at one second
    RecordTtl { max: u32 },
}

impl TtlPolicy {
    pub fn from_config(config: &CacheConfig) -> Self {
        if config.honor_record_ttl {
            TtlPolicy::RecordTtl {
                max: config.max_record_ttl,
            }
        } else {
            TtlPolicy::Fixed(config.ttl)
        }
    }

    pub fn ttl_for(&self, rrset: &RRSet) -> u32 {
        match self {
            TtlPolicy::Fixed(ttl) => *ttl,
            TtlPolicy::RecordTtl { max } => rrset.min_ttl().clamp(1, (*max).max(1)),
        }
    }
}

/// One cached RRset with its insertion stamp.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub rrset: Arc<RRSet>,
    pub inserted_at: Instant,
    pub ttl_secs: u32,
}

impl CacheEntry {
    pub fn new(rrset: Arc<RRSet>, ttl_secs: u32) -> Self {
        Self {
            rrset,
            inserted_at: Instant::now(),
            ttl_secs,
        }
    }

    /// Valid for reads only while `now - inserted_at < ttl`.
    pub fn is_expired(&self) -> bool {
        self.inserted_at.elapsed().as_secs() >= u64::from(self.ttl_secs)
    }
}
