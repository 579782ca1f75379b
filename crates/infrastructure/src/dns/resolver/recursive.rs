//! Recursive shim: hand the whole question to a full-service upstream
//! resolver (RD=1) and take its answer as-is. No algorithm here, just
//! the alternate path the CLI can select.

use super::super::message::{MessageBuilder, ResponseParser};
use super::super::transport::DnsTransport;
use super::iterative::parse_servers;
use async_trait::async_trait;
use rootwalk_application::ports::{DnsResolution, DnsResolver};
use rootwalk_domain::config::ResolverConfig;
use rootwalk_domain::{DnsQuery, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct RecursiveResolver {
    transport: Arc<dyn DnsTransport>,
    upstreams: Vec<SocketAddr>,
    attempt_timeout: Duration,
    max_cname_hops: u32,
}

impl RecursiveResolver {
    pub fn new(
        transport: Arc<dyn DnsTransport>,
        upstreams: Vec<SocketAddr>,
        attempt_timeout: Duration,
        max_cname_hops: u32,
    ) -> Self {
        Self {
            transport,
            upstreams,
            attempt_timeout,
            max_cname_hops,
        }
    }

    pub fn from_config(
        transport: Arc<dyn DnsTransport>,
        config: &ResolverConfig,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(
            transport,
            parse_servers(&config.upstream_servers)?,
            Duration::from_millis(config.query_timeout_ms),
            config.max_cname_hops,
        ))
    }
}

#[async_trait]
impl DnsResolver for RecursiveResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let query_bytes = MessageBuilder::build_query(&query.domain, query.record_type, true)?;
        let mut attempted = 0usize;

        for &upstream in &self.upstreams {
            attempted += 1;

            let bytes = match self
                .transport
                .send(&query_bytes, upstream, self.attempt_timeout)
                .await
            {
                Ok(bytes) => bytes,
                Err(e) if e.is_transport_error() => {
                    warn!(upstream = %upstream, error = %e, "Upstream failed, trying next");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let response = match ResponseParser::parse_bytes(bytes) {
                Ok(response) => response,
                Err(e) => {
                    warn!(upstream = %upstream, error = %e, "Malformed upstream response");
                    continue;
                }
            };

            if response.is_nxdomain() {
                return Err(DomainError::NxDomain {
                    domain: query.domain.to_string(),
                });
            }
            if response.is_server_error() {
                warn!(
                    upstream = %upstream,
                    rcode = ResponseParser::rcode_to_status(response.rcode),
                    "Upstream returned server error"
                );
                continue;
            }

            // Recursive servers inline CNAME chains in the answer
            // section; follow the chain inside this one message.
            let mut current: Arc<str> = Arc::clone(&query.domain);
            for _ in 0..=self.max_cname_hops {
                if let Some(rrset) = response.answer_rrset(&current, query.record_type) {
                    debug!(
                        query = %query,
                        upstream = %upstream,
                        records = rrset.len(),
                        "Upstream answer"
                    );
                    return Ok(DnsResolution::from_wire(rrset, upstream.to_string()));
                }
                match response.cname_target(&current) {
                    Some(target) => current = target,
                    None => break,
                }
            }

            return Err(DomainError::NoAnswer {
                domain: query.domain.to_string(),
            });
        }

        Err(DomainError::AllServersFailed { attempted })
    }
}
