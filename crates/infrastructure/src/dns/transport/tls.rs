//! TLS Transport for DNS queries, DNS-over-TLS (RFC 7858)
//!
//! Upstreams are configured by IP literal, so the certificate is verified
//! against the IP address (IP SAN) using the webpki root store.

use super::tcp::{connect, read_with_length_prefix, send_with_length_prefix};
use super::{io_error, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use owns_dns_domain::DomainError;
use rustls::pki_types::ServerName;
use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::debug;

/// Shared TLS config, built once and reused for all DoT exchanges.
static SHARED_TLS_CONFIG: LazyLock<Arc<rustls::ClientConfig>> = LazyLock::new(|| {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Arc::new(config)
});

/// DNS-over-TLS transport (RFC 7858)
pub struct TlsTransport {
    server_addr: SocketAddr,
}

impl TlsTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn server_name(&self) -> ServerName<'static> {
        ServerName::from(self.server_addr.ip())
    }
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let connector = tokio_rustls::TlsConnector::from(SHARED_TLS_CONFIG.clone());
        let tcp_stream = connect(self.server_addr, timeout).await?;

        let mut stream =
            tokio::time::timeout(timeout, connector.connect(self.server_name(), tcp_stream))
                .await
                .map_err(|_| timeout_error(self.server_addr))?
                .map_err(|e| DomainError::TransportFailure {
                    server: self.server_addr.to_string(),
                    reason: format!("TLS handshake failed: {}", e),
                })?;

        debug!(server = %self.server_addr, "TLS connection established");

        tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| timeout_error(self.server_addr))?
            .map_err(|e| io_error(self.server_addr, e))?;

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| timeout_error(self.server_addr))?
            .map_err(|e| io_error(self.server_addr, e))?;

        debug!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TLS response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TLS",
        })
    }
}
