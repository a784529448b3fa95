pub mod tcp;
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use owns_dns_domain::{DomainError, Transport as TransportKind, UpstreamServer};
use std::io;
use std::time::Duration;

/// Per-exchange timeout applied to every network step (connect, handshake, send, receive).
pub const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
    Tls(tls::TlsTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tls(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }
}

pub fn create_transport(server: &UpstreamServer) -> Transport {
    let addr = server.socket_addr();
    match server.transport {
        TransportKind::Udp => Transport::Udp(udp::UdpTransport::new(addr)),
        TransportKind::Tcp => Transport::Tcp(tcp::TcpTransport::new(addr)),
        TransportKind::TcpTls => Transport::Tls(tls::TlsTransport::new(addr)),
    }
}

/// Maps a socket error onto the transport error taxonomy.
pub(crate) fn io_error(server: impl ToString, err: io::Error) -> DomainError {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
            server: server.to_string(),
        },
        io::ErrorKind::TimedOut => DomainError::TransportTimeout {
            server: server.to_string(),
        },
        _ => DomainError::TransportFailure {
            server: server.to_string(),
            reason: err.to_string(),
        },
    }
}

pub(crate) fn timeout_error(server: impl ToString) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}
