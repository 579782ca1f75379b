//! Server fallback flows: dead, silent and erroring servers ahead of a
//! healthy one, plus total exhaustion.

#[path = "../common/mod.rs"]
mod common;

use common::{flow_config, refused_addr, Behavior, MockNameServer};
use rootwalk_application::ResolveQuery;
use rootwalk_domain::DomainError;
use rootwalk_infrastructure::dns::resolver::ResolverBuilder;
use rootwalk_infrastructure::dns::transport::UdpTransport;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

const WEB_IP: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 80);

async fn resolve_with(
    servers: Vec<String>,
    timeout_ms: u64,
) -> Result<Vec<IpAddr>, DomainError> {
    let mut config = flow_config(servers);
    config.resolver.query_timeout_ms = timeout_ms;

    let resolver = ResolverBuilder::new(Arc::new(UdpTransport::new()), config)
        .build_iterative()
        .unwrap();

    ResolveQuery::new(resolver)
        .execute("example.com", None)
        .await
        .map(|resolution| resolution.rrset.addresses())
}

#[tokio::test]
async fn test_unreachable_server_falls_through_to_next() {
    let healthy = MockNameServer::builder()
        .answer("example.com", &[WEB_IP], 3600)
        .start()
        .await;

    let addresses = resolve_with(vec![refused_addr(), healthy.addr()], 500)
        .await
        .unwrap();

    assert_eq!(addresses, vec![IpAddr::V4(WEB_IP)]);
    assert_eq!(healthy.query_count(), 1);
}

#[tokio::test]
async fn test_silent_server_times_out_then_next_answers() {
    let silent = MockNameServer::builder()
        .fallback(Behavior::Silent)
        .start()
        .await;
    let healthy = MockNameServer::builder()
        .answer("example.com", &[WEB_IP], 3600)
        .start()
        .await;

    let addresses = resolve_with(vec![silent.addr(), healthy.addr()], 200)
        .await
        .unwrap();

    assert_eq!(addresses, vec![IpAddr::V4(WEB_IP)]);
    assert_eq!(silent.query_count(), 1);
    assert_eq!(healthy.query_count(), 1);
}

#[tokio::test]
async fn test_server_error_rcode_tries_next_server() {
    let failing = MockNameServer::builder()
        .fallback(Behavior::ServFail)
        .start()
        .await;
    let healthy = MockNameServer::builder()
        .answer("example.com", &[WEB_IP], 3600)
        .start()
        .await;

    let addresses = resolve_with(vec![failing.addr(), healthy.addr()], 500)
        .await
        .unwrap();

    assert_eq!(addresses, vec![IpAddr::V4(WEB_IP)]);
    assert_eq!(failing.query_count(), 1);
}

#[tokio::test]
async fn test_every_server_dead_reports_exhaustion() {
    let result = resolve_with(vec![refused_addr(), refused_addr()], 200).await;

    assert!(matches!(
        result,
        Err(DomainError::AllServersFailed { attempted: 2 })
    ));
}
