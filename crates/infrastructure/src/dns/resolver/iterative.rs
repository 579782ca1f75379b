//! The delegation walk: bootstrap servers → referrals → authoritative
//! answer, with per-server fallback, bounded CNAME chasing and an
//! overall deadline.

use super::super::message::{MessageBuilder, ResponseParser};
use super::super::transport::DnsTransport;
use async_trait::async_trait;
use rootwalk_application::ports::{DnsResolution, DnsResolver};
use rootwalk_domain::config::ResolverConfig;
use rootwalk_domain::{DnsQuery, DomainError, RRSet, RecordType};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Walk parameters, parsed once out of the config tree.
#[derive(Debug, Clone)]
pub struct IterativeSettings {
    pub roots: Vec<SocketAddr>,
    pub attempt_timeout: Duration,
    pub overall_deadline: Duration,
    pub max_cname_hops: u32,
    pub max_referral_hops: u32,
}

impl IterativeSettings {
    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        let roots = parse_servers(&config.root_servers)?;
        Ok(Self {
            roots,
            attempt_timeout: Duration::from_millis(config.query_timeout_ms),
            overall_deadline: Duration::from_millis(config.overall_deadline_ms),
            max_cname_hops: config.max_cname_hops,
            max_referral_hops: config.max_referral_hops,
        })
    }
}

pub(crate) fn parse_servers(servers: &[String]) -> Result<Vec<SocketAddr>, DomainError> {
    servers
        .iter()
        .map(|s| {
            s.parse::<SocketAddr>()
                .map_err(|e| DomainError::IoError(format!("Invalid server address '{s}': {e}")))
        })
        .collect()
}

/// What one walk produced: a terminal answer, or an alias to chase with
/// a fresh walk.
enum WalkOutcome {
    Answer { rrset: RRSet, server: SocketAddr },
    Alias(Arc<str>),
}

pub struct IterativeResolver {
    transport: Arc<dyn DnsTransport>,
    settings: IterativeSettings,
}

impl IterativeResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, settings: IterativeSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// One full walk for one name, from the bootstrap set down.
    async fn walk(
        &self,
        name: &str,
        record_type: RecordType,
        deadline: Instant,
    ) -> Result<WalkOutcome, DomainError> {
        let query_bytes = MessageBuilder::build_query(name, record_type, false)?;
        let mut servers = self.settings.roots.clone();
        let mut referral_hops: u32 = 0;

        'delegation: loop {
            let mut attempted = 0usize;

            for &server in &servers {
                let timeout = remaining_timeout(deadline, self.settings.attempt_timeout)
                    .ok_or_else(|| DomainError::DeadlineExceeded {
                        domain: name.to_string(),
                    })?;
                attempted += 1;

                let bytes = match self.transport.send(&query_bytes, server, timeout).await {
                    Ok(bytes) => bytes,
                    Err(e) if e.is_transport_error() => {
                        warn!(server = %server, error = %e, "Server attempt failed, trying next");
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                let response = match ResponseParser::parse_bytes(bytes) {
                    Ok(response) => response,
                    Err(e) => {
                        warn!(server = %server, error = %e, "Malformed response, trying next server");
                        continue;
                    }
                };

                if response.is_nxdomain() {
                    return Err(DomainError::NxDomain {
                        domain: name.to_string(),
                    });
                }
                if response.is_server_error() {
                    warn!(
                        server = %server,
                        rcode = ResponseParser::rcode_to_status(response.rcode),
                        "Server error rcode, trying next server"
                    );
                    continue;
                }

                if let Some(rrset) = response.answer_rrset(name, record_type) {
                    debug!(
                        name = %name,
                        record_type = %record_type,
                        server = %server,
                        records = rrset.len(),
                        "Authoritative answer"
                    );
                    return Ok(WalkOutcome::Answer { rrset, server });
                }

                if let Some(target) = response.cname_target(name) {
                    debug!(name = %name, target = %target, "Answer is an alias");
                    return Ok(WalkOutcome::Alias(target));
                }

                let next = response.referral_servers();
                if !next.is_empty() {
                    referral_hops += 1;
                    if referral_hops > self.settings.max_referral_hops || next == servers {
                        return Err(DomainError::LoopDetected {
                            domain: name.to_string(),
                            hops: referral_hops,
                        });
                    }
                    debug!(
                        name = %name,
                        servers = next.len(),
                        hop = referral_hops,
                        "Following referral to delegated servers"
                    );
                    servers = next;
                    continue 'delegation;
                }

                // Parsed fine but carries neither answer, alias nor glue.
                return Err(DomainError::NoAnswer {
                    domain: name.to_string(),
                });
            }

            return Err(DomainError::AllServersFailed { attempted });
        }
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let deadline = Instant::now() + self.settings.overall_deadline;
        let mut current_name: Arc<str> = Arc::clone(&query.domain);
        let mut cname_hops: u32 = 0;

        // CNAME indirection is a fresh walk for the target name, bounded
        // by a hop counter, never recursion.
        loop {
            match self
                .walk(&current_name, query.record_type, deadline)
                .await?
            {
                WalkOutcome::Answer { rrset, server } => {
                    return Ok(DnsResolution::from_wire(rrset, server.to_string()));
                }
                WalkOutcome::Alias(target) => {
                    cname_hops += 1;
                    if cname_hops > self.settings.max_cname_hops {
                        return Err(DomainError::LoopDetected {
                            domain: query.domain.to_string(),
                            hops: cname_hops,
                        });
                    }
                    debug!(
                        from = %current_name,
                        to = %target,
                        hop = cname_hops,
                        "Chasing CNAME with a fresh walk"
                    );
                    current_name = target;
                }
            }
        }
    }
}

fn remaining_timeout(deadline: Instant, attempt_timeout: Duration) -> Option<Duration> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        None
    } else {
        Some(left.min(attempt_timeout))
    }
}
