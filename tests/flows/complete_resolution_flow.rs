//! Whole-stack resolution flows over real loopback UDP: question in,
//! validated answer out, with the cache decorator in the loop.

#[path = "../common/mod.rs"]
mod common;

use common::{flow_config, Behavior, MockNameServer};
use rootwalk_application::ports::DnsResolver;
use rootwalk_application::ResolveQuery;
use rootwalk_domain::{Config, DomainError};
use rootwalk_infrastructure::dns::cache::AnswerCache;
use rootwalk_infrastructure::dns::resolver::ResolverBuilder;
use rootwalk_infrastructure::dns::transport::UdpTransport;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

const WEB_IP: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

fn iterative_stack(config: &Config) -> (Arc<dyn DnsResolver>, Option<Arc<AnswerCache>>) {
    let cache = config
        .cache
        .enabled
        .then(|| Arc::new(AnswerCache::new(&config.cache)));

    let mut builder = ResolverBuilder::new(Arc::new(UdpTransport::new()), config.clone());
    if let Some(cache) = &cache {
        builder = builder.with_cache(Arc::clone(cache));
    }
    (builder.build_iterative().unwrap(), cache)
}

#[tokio::test]
async fn test_question_to_answer_over_udp() {
    let server = MockNameServer::builder()
        .answer("example.com", &[WEB_IP], 3600)
        .start()
        .await;

    let config = flow_config(vec![server.addr()]);
    let (resolver, _) = iterative_stack(&config);

    let resolution = ResolveQuery::new(resolver)
        .execute("Example.COM.", None)
        .await
        .unwrap();

    assert_eq!(resolution.rrset.addresses(), vec![IpAddr::V4(WEB_IP)]);
    assert!(!resolution.cache_hit);
    assert_eq!(resolution.server.as_deref(), Some(server.addr().as_str()));
    assert_eq!(server.query_count(), 1);
}

#[tokio::test]
async fn test_cname_chase_restarts_from_bootstrap() {
    let server = MockNameServer::builder()
        .behavior(
            "www.example.com",
            Behavior::Alias {
                target: "example.com".to_string(),
            },
        )
        .answer("example.com", &[WEB_IP], 3600)
        .start()
        .await;

    let config = flow_config(vec![server.addr()]);
    let (resolver, _) = iterative_stack(&config);

    let resolution = ResolveQuery::new(resolver)
        .execute("www.example.com", None)
        .await
        .unwrap();

    assert_eq!(resolution.rrset.addresses(), vec![IpAddr::V4(WEB_IP)]);
    assert_eq!(&**resolution.rrset.name(), "example.com");
    // One walk for the alias, a fresh one for the target.
    assert_eq!(server.query_count(), 2);
}

#[tokio::test]
async fn test_second_question_served_from_cache() {
    let server = MockNameServer::builder()
        .answer("example.com", &[WEB_IP], 3600)
        .start()
        .await;

    let mut config = flow_config(vec![server.addr()]);
    config.cache.enabled = true;
    let (resolver, cache) = iterative_stack(&config);
    let use_case = ResolveQuery::new(resolver);

    let first = use_case.execute("example.com", None).await.unwrap();
    let second = use_case.execute("example.com", None).await.unwrap();

    assert!(!first.cache_hit);
    assert!(second.cache_hit);
    assert_eq!(second.rrset.addresses(), first.rrset.addresses());
    assert_eq!(server.query_count(), 1);

    let stats = cache.unwrap().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_nxdomain_is_terminal_and_never_cached() {
    let server = MockNameServer::builder()
        .behavior("missing.example.com", Behavior::NxDomain)
        .start()
        .await;

    let mut config = flow_config(vec![server.addr()]);
    config.cache.enabled = true;
    let (resolver, _) = iterative_stack(&config);
    let use_case = ResolveQuery::new(resolver);

    for _ in 0..2 {
        let result = use_case.execute("missing.example.com", None).await;
        assert!(matches!(result, Err(DomainError::NxDomain { .. })));
    }

    // Failures always go back to the wire.
    assert_eq!(server.query_count(), 2);
}

#[tokio::test]
async fn test_recursive_shim_follows_inlined_chain() {
    let upstream = MockNameServer::builder()
        .behavior(
            "www.example.com",
            Behavior::Chain {
                target: "example.com".to_string(),
                addresses: vec![WEB_IP],
                ttl: 300,
            },
        )
        .start()
        .await;

    let config = flow_config(vec![upstream.addr()]);
    let resolver = ResolverBuilder::new(Arc::new(UdpTransport::new()), config)
        .build_recursive()
        .unwrap();

    let resolution = ResolveQuery::new(resolver)
        .execute("www.example.com", None)
        .await
        .unwrap();

    assert_eq!(resolution.rrset.addresses(), vec![IpAddr::V4(WEB_IP)]);
    // The upstream answered the whole chain in one round trip.
    assert_eq!(upstream.query_count(), 1);
}
