use async_trait::async_trait;
use rootwalk_domain::{DnsQuery, DomainError, RRSet};
use std::sync::Arc;

/// Result of one resolution.
#[derive(Debug, Clone)]
pub struct DnsResolution {
    /// The answer RRset, cached under the original question
    pub rrset: Arc<RRSet>,
    /// Whether the answer came from the cache (no network activity)
    pub cache_hit: bool,
    /// Server that produced the answer, when it came off the wire
    pub server: Option<Arc<str>>,
}

impl DnsResolution {
    pub fn from_wire(rrset: RRSet, server: impl Into<Arc<str>>) -> Self {
        Self {
            rrset: Arc::new(rrset),
            cache_hit: false,
            server: Some(server.into()),
        }
    }

    pub fn from_cache(rrset: Arc<RRSet>) -> Self {
        Self {
            rrset,
            cache_hit: true,
            server: None,
        }
    }
}

/// Port for anything that can answer a DNS question: the iterative
/// engine, the recursive shim, or either one wrapped in the cache layer.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;
}
