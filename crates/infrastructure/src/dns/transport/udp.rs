use super::DnsTransport;
use async_trait::async_trait;
use bytes::Bytes;
use rootwalk_domain::DomainError;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP. Binds an ephemeral socket per query so concurrent
/// resolutions never share transaction state.
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Bytes, DomainError> {
        // 0 = OS assigns an ephemeral port
        let bind_addr: SocketAddr = if server.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        // Connecting surfaces ICMP port-unreachable as ConnectionRefused.
        socket
            .connect(server)
            .await
            .map_err(|e| classify_io_error(e, server))?;

        let started = Instant::now();

        let bytes_sent = tokio::time::timeout(timeout, socket.send(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.to_string(),
            })?
            .map_err(|e| classify_io_error(e, server))?;

        debug!(
            server = %server,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        // The receive wait spends whatever the send left of the budget,
        // so one attempt never exceeds `timeout` in total.
        let remaining = timeout.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            return Err(DomainError::TransportTimeout {
                server: server.to_string(),
            });
        }

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = tokio::time::timeout(remaining, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.to_string(),
            })?
            .map_err(|e| classify_io_error(e, server))?;

        if bytes_received == 0 {
            warn!(server = %server, "Empty UDP response");
            return Err(DomainError::InvalidDnsResponse(format!(
                "Empty response from {}",
                server
            )));
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %server,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(Bytes::from(recv_buf))
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

fn classify_io_error(error: std::io::Error, server: SocketAddr) -> DomainError {
    match error.kind() {
        ErrorKind::ConnectionRefused | ErrorKind::ConnectionReset | ErrorKind::HostUnreachable => {
            DomainError::TransportUnreachable {
                server: server.to_string(),
            }
        }
        ErrorKind::TimedOut => DomainError::TransportTimeout {
            server: server.to_string(),
        },
        _ => DomainError::IoError(format!("UDP error contacting {}: {}", server, error)),
    }
}
