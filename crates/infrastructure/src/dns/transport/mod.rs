pub mod udp;

pub use udp::UdpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use rootwalk_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// One query datagram to one server, one parsed-or-failed reply.
///
/// The server address is per-call: the iterative walk re-targets every
/// delegation step. Implementations must not retry; all retry and
/// fallback policy belongs to the resolver.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Bytes, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
