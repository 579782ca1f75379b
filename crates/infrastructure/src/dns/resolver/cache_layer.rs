use super::super::cache::AnswerCache;
use async_trait::async_trait;
use rootwalk_application::ports::{DnsResolution, DnsResolver};
use rootwalk_domain::{DnsQuery, DomainError};
use std::sync::Arc;
use tracing::debug;

/// Answer-cache decorator.
///
/// Serves hits without network activity; on a miss, delegates to the
/// wrapped resolver and stores the result under the original question,
/// never under an intermediate CNAME target. Failures are never cached.
pub struct CachedResolver {
    inner: Arc<dyn DnsResolver>,
    cache: Arc<AnswerCache>,
}

impl CachedResolver {
    pub fn new(inner: Arc<dyn DnsResolver>, cache: Arc<AnswerCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<AnswerCache> {
        &self.cache
    }
}

#[async_trait]
impl DnsResolver for CachedResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        if let Some(rrset) = self.cache.get(query) {
            debug!(query = %query, "Cache HIT");
            return Ok(DnsResolution::from_cache(rrset));
        }

        debug!(query = %query, "Cache MISS");
        let resolution = self.inner.resolve(query).await?;
        self.cache.insert(query, Arc::clone(&resolution.rrset));
        Ok(resolution)
    }
}
