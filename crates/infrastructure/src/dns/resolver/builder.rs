use super::super::cache::AnswerCache;
use super::super::transport::DnsTransport;
use super::cache_layer::CachedResolver;
use super::iterative::{IterativeResolver, IterativeSettings};
use super::recursive::RecursiveResolver;
use rootwalk_application::ports::DnsResolver;
use rootwalk_domain::config::Config;
use rootwalk_domain::DomainError;
use std::sync::Arc;

/// Assembles a resolver stack: core engine, optionally wrapped in the
/// answer cache.
pub struct ResolverBuilder {
    transport: Arc<dyn DnsTransport>,
    config: Config,
    cache: Option<Arc<AnswerCache>>,
}

impl ResolverBuilder {
    pub fn new(transport: Arc<dyn DnsTransport>, config: Config) -> Self {
        Self {
            transport,
            config,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<AnswerCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The iterative engine, cache-wrapped when configured.
    pub fn build_iterative(&self) -> Result<Arc<dyn DnsResolver>, DomainError> {
        let settings = IterativeSettings::from_config(&self.config.resolver)?;
        let core: Arc<dyn DnsResolver> =
            Arc::new(IterativeResolver::new(Arc::clone(&self.transport), settings));
        Ok(self.wrap_cache(core))
    }

    /// The recursive shim, cache-wrapped when configured.
    pub fn build_recursive(&self) -> Result<Arc<dyn DnsResolver>, DomainError> {
        let core: Arc<dyn DnsResolver> = Arc::new(RecursiveResolver::from_config(
            Arc::clone(&self.transport),
            &self.config.resolver,
        )?);
        Ok(self.wrap_cache(core))
    }

    fn wrap_cache(&self, inner: Arc<dyn DnsResolver>) -> Arc<dyn DnsResolver> {
        match &self.cache {
            Some(cache) => Arc::new(CachedResolver::new(inner, Arc::clone(cache))),
            None => inner,
        }
    }
}
