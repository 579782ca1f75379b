use rootwalk_application::ports::DnsResolver;
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::cache::AnswerCache;
use rootwalk_infrastructure::dns::resolver::ResolverBuilder;
use rootwalk_infrastructure::dns::transport::UdpTransport;
use std::sync::Arc;

/// The wired resolver stacks. Both share one answer cache, so an answer
/// obtained through either path serves later questions through both.
pub struct Resolvers {
    pub iterative: Arc<dyn DnsResolver>,
    pub recursive: Arc<dyn DnsResolver>,
    pub cache: Option<Arc<AnswerCache>>,
}

pub fn build_resolvers(config: &Config) -> anyhow::Result<Resolvers> {
    let transport = Arc::new(UdpTransport::new());

    let cache = config
        .cache
        .enabled
        .then(|| Arc::new(AnswerCache::new(&config.cache)));

    let mut builder = ResolverBuilder::new(transport, config.clone());
    if let Some(cache) = &cache {
        builder = builder.with_cache(Arc::clone(cache));
    }

    Ok(Resolvers {
        iterative: builder.build_iterative()?,
        recursive: builder.build_recursive()?,
        cache,
    })
}
