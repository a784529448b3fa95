use hickory_proto::op::{Message, MessageType};
use hickory_proto::serialize::binary::BinEncodable;
use owns_dns_application::use_cases::{HandleDnsQueryUseCase, ResolutionSource};
use owns_dns_domain::DomainError;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns raw request datagrams into raw reply datagrams.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns the encoded reply, or `None` when nothing should be sent back:
    /// undecodable input, a message that is not a query, or every upstream failed.
    pub async fn handle_raw_udp(&self, buf: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(buf) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %client_ip, error = %e, "Dropping undecodable DNS message");
                return None;
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client_ip, "Ignoring non-query message");
            return None;
        }

        let resolution = match self.use_case.execute(&request, client_ip).await {
            Ok(resolution) => resolution,
            Err(DomainError::TransportAllServersUnreachable) => {
                debug!(client = %client_ip, id = request.id(), "No upstream answered, dropping query");
                return None;
            }
            Err(e) => {
                warn!(client = %client_ip, error = %e, "Query resolution failed");
                return None;
            }
        };

        let source = match resolution.source {
            ResolutionSource::Cache => "cache",
            ResolutionSource::Local => "local",
            ResolutionSource::Upstream(_) => "upstream",
        };

        match resolution.message.to_vec() {
            Ok(bytes) => {
                debug!(
                    client = %client_ip,
                    source,
                    answers = resolution.message.answers().len(),
                    "Sending response"
                );
                Some(bytes)
            }
            Err(e) => {
                warn!(client = %client_ip, error = %e, "Failed to encode response");
                None
            }
        }
    }
}
