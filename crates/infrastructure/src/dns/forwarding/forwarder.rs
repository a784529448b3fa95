use crate::dns::transport::{create_transport, DEFAULT_EXCHANGE_TIMEOUT};
use async_trait::async_trait;
use hickory_proto::op::Message;
use hickory_proto::serialize::binary::BinEncodable;
use owns_dns_application::ports::UpstreamExchange;
use owns_dns_domain::{DomainError, UpstreamServer};
use std::time::Duration;
use tracing::debug;

/// Relays a client request to one upstream server over its configured transport.
pub struct UpstreamForwarder {
    timeout: Duration,
}

impl Default for UpstreamForwarder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamForwarder {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXCHANGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl UpstreamExchange for UpstreamForwarder {
    async fn exchange(
        &self,
        server: &UpstreamServer,
        request: &Message,
    ) -> Result<Message, DomainError> {
        let request_bytes = request
            .to_vec()
            .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

        let transport = create_transport(server);
        let response = transport.send(&request_bytes, self.timeout).await?;

        let message = Message::from_vec(&response.bytes).map_err(|e| {
            DomainError::TransportFailure {
                server: server.to_string(),
                reason: format!("Undecodable response: {}", e),
            }
        })?;

        if message.id() != request.id() {
            return Err(DomainError::TransportFailure {
                server: server.to_string(),
                reason: format!(
                    "Response id {} does not match request id {}",
                    message.id(),
                    request.id()
                ),
            });
        }

        debug!(
            server = %server,
            protocol = response.protocol_used,
            answers = message.answers().len(),
            "Upstream exchange completed"
        );

        Ok(message)
    }
}
